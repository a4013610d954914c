//! LoanDesk CLI - back-office client for the loan management API

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use loandesk_core::{Config, Role};
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;
mod navigator;
mod prompt;

use commands::{
  cmd_clients_create, cmd_clients_delete, cmd_clients_edit, cmd_clients_list, cmd_clients_show, cmd_config_init,
  cmd_config_show, cmd_finance_penalty, cmd_finance_repay, cmd_finance_show, cmd_login, cmd_logout, cmd_report,
  cmd_staff_create, cmd_staff_delete, cmd_staff_edit, cmd_staff_list, cmd_upload, cmd_whoami,
};
use logging::init_logging;

#[derive(Parser)]
#[command(name = "loandesk")]
#[command(about = "Back-office client for directors, managers and credit agents")]
#[command(after_help = "\
QUICK START:
  loandesk config init                                 # Write .loandesk/config.toml
  loandesk login --role manager --email me@example.com # Start a session
  loandesk clients list                                # Browse clients

FORMS:
  loandesk clients create       # Three-step client onboarding
  loandesk finance repay <id>   # Record a repayment")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `loandesk clients`
#[derive(Subcommand)]
pub enum ClientsCommand {
  /// List all clients visible to you
  List {
    #[arg(long)]
    json: bool,
  },
  /// Show one client with loan terms and documents
  Show {
    id: String,
    #[arg(long)]
    json: bool,
  },
  /// Register a new client (interactive)
  Create,
  /// Edit an existing client (interactive, prefilled)
  Edit { id: String },
  /// Delete a client
  Delete { id: String },
}

/// Subcommands for `loandesk staff`
#[derive(Subcommand)]
pub enum StaffCommand {
  /// List staff of a role
  List {
    /// director, manager or agent
    #[arg(short, long)]
    role: Role,
    #[arg(long)]
    json: bool,
  },
  /// Register a staff member (interactive)
  Create {
    #[arg(short, long)]
    role: Role,
  },
  /// Edit a staff member (interactive, prefilled)
  Edit {
    #[arg(short, long)]
    role: Role,
    id: String,
  },
  /// Remove a staff member
  Delete {
    #[arg(short, long)]
    role: Role,
    id: String,
  },
}

/// Subcommands for `loandesk finance`
#[derive(Subcommand)]
pub enum FinanceCommand {
  /// Show balance, repayments and penalties for a client
  Show {
    client_id: String,
    #[arg(long)]
    json: bool,
  },
  /// Record a repayment (interactive)
  Repay { client_id: String },
  /// Apply a penalty (interactive)
  Penalty { client_id: String },
}

/// Subcommands for `loandesk config`
#[derive(Subcommand)]
pub enum ConfigCommand {
  /// Show effective configuration
  Show,
  /// Write a config template
  Init {
    /// Write to the user config location instead of the project
    #[arg(long)]
    user: bool,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum Commands {
  /// Log in with a role-specific account
  Login {
    /// director, manager or agent
    #[arg(short, long)]
    role: Role,
    #[arg(short, long)]
    email: String,
    /// Read from stdin when omitted
    #[arg(long)]
    password: Option<String>,
  },
  /// Clear stored credentials
  Logout,
  /// Show the current session and visible sections
  Whoami {
    #[arg(long)]
    json: bool,
  },
  /// Client records
  Clients {
    #[command(subcommand)]
    command: ClientsCommand,
  },
  /// Directors, managers and credit agents
  Staff {
    #[command(subcommand)]
    command: StaffCommand,
  },
  /// Repayments and penalties
  Finance {
    #[command(subcommand)]
    command: FinanceCommand,
  },
  /// Agent performance report
  Report {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long)]
    json: bool,
  },
  /// Upload a document to the hosting provider
  Upload {
    path: PathBuf,
    /// Display name (default: file name)
    #[arg(short, long)]
    name: Option<String>,
  },
  /// Configuration management
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let _guard = init_logging(&Config::load_for_project(&cwd).logging);

  match cli.command {
    Commands::Login { role, email, password } => cmd_login(role, &email, password).await,
    Commands::Logout => cmd_logout().await,
    Commands::Whoami { json } => cmd_whoami(json).await,

    Commands::Clients { command } => match command {
      ClientsCommand::List { json } => cmd_clients_list(json).await,
      ClientsCommand::Show { id, json } => cmd_clients_show(&id, json).await,
      ClientsCommand::Create => cmd_clients_create().await,
      ClientsCommand::Edit { id } => cmd_clients_edit(&id).await,
      ClientsCommand::Delete { id } => cmd_clients_delete(&id).await,
    },

    Commands::Staff { command } => match command {
      StaffCommand::List { role, json } => cmd_staff_list(role, json).await,
      StaffCommand::Create { role } => cmd_staff_create(role).await,
      StaffCommand::Edit { role, id } => cmd_staff_edit(role, &id).await,
      StaffCommand::Delete { role, id } => cmd_staff_delete(role, &id).await,
    },

    Commands::Finance { command } => match command {
      FinanceCommand::Show { client_id, json } => cmd_finance_show(&client_id, json).await,
      FinanceCommand::Repay { client_id } => cmd_finance_repay(&client_id).await,
      FinanceCommand::Penalty { client_id } => cmd_finance_penalty(&client_id).await,
    },

    Commands::Report { from, to, json } => cmd_report(from, to, json).await,
    Commands::Upload { path, name } => cmd_upload(&path, name.as_deref()).await,

    Commands::Config { command } => match command {
      ConfigCommand::Show => cmd_config_show().await,
      ConfigCommand::Init { user, force } => cmd_config_init(user, force).await,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_staff_role() {
    let cli = Cli::try_parse_from(["loandesk", "staff", "list", "--role", "agent"]).unwrap();
    match cli.command {
      Commands::Staff {
        command: StaffCommand::List { role, json },
      } => {
        assert_eq!(role, Role::CreditAgent);
        assert!(!json);
      }
      _ => panic!("wrong command"),
    }
  }

  #[test]
  fn test_parse_report_dates() {
    let cli = Cli::try_parse_from(["loandesk", "report", "--from", "2024-01-01"]).unwrap();
    match cli.command {
      Commands::Report { from, to, .. } => {
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(to, None);
      }
      _ => panic!("wrong command"),
    }
    assert!(Cli::try_parse_from(["loandesk", "staff", "list", "--role", "cfo"]).is_err());
  }
}
