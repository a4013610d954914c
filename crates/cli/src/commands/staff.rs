//! Staff commands, one collection per role

use anyhow::{Context, Result};
use api::{StaffService, StaffSubmitter};
use loandesk_core::Role;
use wizard::{StaffForm, Wizard};

use crate::context::{AppContext, staff_section};
use crate::format::format_staff_list;

fn open(role: Role, route: &str) -> Result<(AppContext, StaffService)> {
  let ctx = AppContext::load(route)?;
  ctx.require(staff_section(role))?;
  let service = StaffService::new(ctx.api.clone(), role);
  Ok((ctx, service))
}

pub async fn cmd_staff_list(role: Role, json: bool) -> Result<()> {
  let (_ctx, service) = open(role, role.staff_collection())?;
  let members = service
    .list()
    .await
    .with_context(|| format!("Failed to list {}", role.staff_collection()))?;

  if json {
    return super::print_json(&members);
  }
  println!("{}", format_staff_list(&members));
  Ok(())
}

pub async fn cmd_staff_create(role: Role) -> Result<()> {
  let (ctx, service) = open(role, &format!("{}/new", role.staff_collection()))?;
  let submitter = StaffSubmitter::new(service, ctx.uploader()?);
  let wizard = Wizard::new(StaffForm::create(role))?;
  super::drive_form(&ctx, wizard, &submitter).await
}

pub async fn cmd_staff_edit(role: Role, id: &str) -> Result<()> {
  let (ctx, service) = open(role, &format!("{}/{}/edit", role.staff_collection(), id))?;
  let member = service
    .get(id)
    .await
    .with_context(|| format!("Failed to load {} {}", role, id))?;

  let (form, draft) = StaffForm::edit(&member);
  let wizard = Wizard::with_draft(form, draft)?;
  let submitter = StaffSubmitter::new(service, ctx.uploader()?);
  super::drive_form(&ctx, wizard, &submitter).await
}

pub async fn cmd_staff_delete(role: Role, id: &str) -> Result<()> {
  let (_ctx, service) = open(role, role.staff_collection())?;
  let message = service
    .delete(id)
    .await
    .with_context(|| format!("Failed to delete {} {}", role, id))?;
  println!("{}", message.unwrap_or_else(|| format!("{} {} deleted", role.profile().label, id)));
  Ok(())
}
