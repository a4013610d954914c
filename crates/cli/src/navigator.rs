//! Navigator for the terminal: each command declares the screen it stands in
//! for, and redirects are reported on stderr.

use api::Navigator;
use std::sync::Mutex;

pub struct TerminalNavigator {
  current: Mutex<String>,
}

impl TerminalNavigator {
  pub fn new(route: impl Into<String>) -> Self {
    Self {
      current: Mutex::new(route.into()),
    }
  }
}

impl Navigator for TerminalNavigator {
  fn current_route(&self) -> String {
    self.current.lock().map(|c| c.clone()).unwrap_or_default()
  }

  fn navigate(&self, route: &str) {
    if let Ok(mut current) = self.current.lock() {
      *current = route.to_string();
    }
    if api::is_auth_route(route) {
      eprintln!("Please log in: loandesk login --role <director|manager|agent> --email <email>");
    } else {
      eprintln!("-> {}", route);
    }
  }
}
