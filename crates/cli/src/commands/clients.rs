//! Client commands (list, show, create, edit, delete)

use anyhow::{Context, Result};
use api::{ClientService, ClientSubmitter};
use loandesk_core::Section;
use wizard::{ClientForm, Wizard};

use crate::context::AppContext;
use crate::format::{format_client, format_client_list};

pub async fn cmd_clients_list(json: bool) -> Result<()> {
  let ctx = AppContext::load("/clients")?;
  ctx.require(Section::Clients)?;

  let clients = ClientService::new(ctx.api.clone())
    .list()
    .await
    .context("Failed to list clients")?;

  if json {
    return super::print_json(&clients);
  }
  println!("{}", format_client_list(&clients));
  Ok(())
}

pub async fn cmd_clients_show(id: &str, json: bool) -> Result<()> {
  let ctx = AppContext::load(&format!("/clients/{}", id))?;
  ctx.require(Section::Clients)?;

  let client = ClientService::new(ctx.api.clone())
    .get(id)
    .await
    .with_context(|| format!("Failed to load client {}", id))?;

  if json {
    return super::print_json(&client);
  }
  println!("{}", format_client(&client));
  Ok(())
}

pub async fn cmd_clients_create() -> Result<()> {
  let ctx = AppContext::load("/clients/new")?;
  ctx.require(Section::Clients)?;

  let submitter = ClientSubmitter::new(ClientService::new(ctx.api.clone()), ctx.uploader()?);
  let wizard = Wizard::new(ClientForm::create())?;
  super::drive_form(&ctx, wizard, &submitter).await
}

pub async fn cmd_clients_edit(id: &str) -> Result<()> {
  let ctx = AppContext::load(&format!("/clients/{}/edit", id))?;
  ctx.require(Section::Clients)?;

  let service = ClientService::new(ctx.api.clone());
  let client = service
    .get(id)
    .await
    .with_context(|| format!("Failed to load client {}", id))?;

  let (form, draft) = ClientForm::edit(&client);
  let wizard = Wizard::with_draft(form, draft)?;
  let submitter = ClientSubmitter::new(service, ctx.uploader()?);
  super::drive_form(&ctx, wizard, &submitter).await
}

pub async fn cmd_clients_delete(id: &str) -> Result<()> {
  let ctx = AppContext::load("/clients")?;
  ctx.require(Section::Clients)?;

  let message = ClientService::new(ctx.api.clone())
    .delete(id)
    .await
    .with_context(|| format!("Failed to delete client {}", id))?;
  println!("{}", message.unwrap_or_else(|| format!("Client {} deleted", id)));
  Ok(())
}
