use anyhow::{Context, Result, bail};
use api::ReportService;
use chrono::NaiveDate;
use loandesk_core::Section;

use crate::context::AppContext;
use crate::format::format_report;

pub async fn cmd_report(from: Option<NaiveDate>, to: Option<NaiveDate>, json: bool) -> Result<()> {
  if let (Some(from), Some(to)) = (from, to)
    && from > to
  {
    bail!("--from ({}) is after --to ({})", from, to);
  }

  let ctx = AppContext::load("/reports")?;
  ctx.require(Section::Reports)?;

  let report = ReportService::new(ctx.api.clone())
    .performance(from, to)
    .await
    .context("Failed to load performance report")?;

  if json {
    return super::print_json(&report);
  }
  println!("{}", format_report(&report));
  Ok(())
}
