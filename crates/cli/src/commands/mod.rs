//! CLI command implementations

mod auth;
mod clients;
mod config;
mod finance;
mod report;
mod staff;
mod upload;

pub use auth::{cmd_login, cmd_logout, cmd_whoami};
pub use clients::{cmd_clients_create, cmd_clients_delete, cmd_clients_edit, cmd_clients_list, cmd_clients_show};
pub use config::{cmd_config_init, cmd_config_show};
pub use finance::{cmd_finance_penalty, cmd_finance_repay, cmd_finance_show};
pub use report::cmd_report;
pub use staff::{cmd_staff_create, cmd_staff_delete, cmd_staff_edit, cmd_staff_list};
pub use upload::cmd_upload;

use anyhow::Result;
use api::Navigator;
use serde::Serialize;
use wizard::{FormFlow, Submitter, Wizard};

use crate::context::AppContext;
use crate::prompt::{FormResult, run_wizard};

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Run a form on stdin/stdout and follow its success route
pub(crate) async fn drive_form<F, S>(ctx: &AppContext, mut wizard: Wizard<F>, submitter: &S) -> Result<()>
where
  F: FormFlow,
  S: Submitter<F::Payload>,
{
  println!("Enter to keep a value, '-' to clear, ':back' for the previous step, ':quit' to abandon.");
  let stdin = std::io::stdin();
  let mut input = stdin.lock();
  let mut out = std::io::stdout();

  match run_wizard(&mut wizard, submitter, &mut input, &mut out).await? {
    FormResult::Submitted { route, .. } => ctx.navigator.navigate(&route),
    FormResult::Cancelled => println!("Cancelled."),
  }
  Ok(())
}
