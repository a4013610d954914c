//! Finance commands (show, repay, penalty)

use anyhow::{Context, Result};
use api::{FinanceService, PenaltySubmitter, RepaymentSubmitter};
use loandesk_core::Section;
use wizard::{PenaltyForm, RepaymentForm, Wizard};

use crate::context::AppContext;
use crate::format::format_finance;

fn open(client_id: &str) -> Result<(AppContext, FinanceService)> {
  let ctx = AppContext::load(&format!("/finance/{}", client_id))?;
  ctx.require(Section::Finance)?;
  let service = FinanceService::new(ctx.api.clone());
  Ok((ctx, service))
}

pub async fn cmd_finance_show(client_id: &str, json: bool) -> Result<()> {
  let (_ctx, service) = open(client_id)?;
  let record = service
    .record(client_id)
    .await
    .with_context(|| format!("Failed to load finance for client {}", client_id))?;

  if json {
    return super::print_json(&record);
  }
  println!("{}", format_finance(&record));
  Ok(())
}

pub async fn cmd_finance_repay(client_id: &str) -> Result<()> {
  let (ctx, service) = open(client_id)?;
  let wizard = Wizard::new(RepaymentForm::new(client_id))?;
  super::drive_form(&ctx, wizard, &RepaymentSubmitter::new(service)).await
}

pub async fn cmd_finance_penalty(client_id: &str) -> Result<()> {
  let (ctx, service) = open(client_id)?;
  let wizard = Wizard::new(PenaltyForm::new(client_id))?;
  super::drive_form(&ctx, wizard, &PenaltySubmitter::new(service)).await
}
