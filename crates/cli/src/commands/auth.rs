//! Session commands (login, logout, whoami)

use anyhow::{Context, Result, bail};
use api::AuthService;
use loandesk_core::Role;
use std::io::{BufRead, Write};

use crate::context::AppContext;
use crate::format::format_session;

fn prompt_password() -> Result<String> {
  print!("Password: ");
  std::io::stdout().flush()?;
  let mut line = String::new();
  std::io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\r', '\n']).to_string();
  if password.is_empty() {
    bail!("Password is required");
  }
  Ok(password)
}

pub async fn cmd_login(role: Role, email: &str, password: Option<String>) -> Result<()> {
  let ctx = AppContext::load(&role.login_path())?;
  let password = match password {
    Some(p) => p,
    None => prompt_password()?,
  };

  let session = AuthService::new(ctx.api.clone())
    .login(role, email, &password)
    .await
    .context("Login failed")?;

  println!("{}", format_session(&session));
  Ok(())
}

pub async fn cmd_logout() -> Result<()> {
  let ctx = AppContext::load("/")?;
  AuthService::new(ctx.api.clone()).logout()?;
  println!("Logged out");
  Ok(())
}

pub async fn cmd_whoami(json: bool) -> Result<()> {
  let ctx = AppContext::load("/")?;
  let Some(session) = AuthService::new(ctx.api.clone()).current_session()? else {
    println!("Not logged in");
    return Ok(());
  };

  if json {
    return super::print_json(&serde_json::json!({
      "role": session.role,
      "user": session.user,
      "landing": session.role.landing_route(),
      "sections": session.role.profile().sections,
    }));
  }
  println!("{}", format_session(&session));
  Ok(())
}
