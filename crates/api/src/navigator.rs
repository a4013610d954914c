//! Route seam between the HTTP layer and whatever front-end hosts it.

use loandesk_core::ALL_ROLES;
use std::sync::Mutex;

/// Route shown after credentials are wiped
pub const LOGIN_ROUTE: &str = "/login";

pub trait Navigator: Send + Sync {
  fn current_route(&self) -> String;
  fn navigate(&self, route: &str);
}

/// Whether `route` is one of the login screens
pub fn is_auth_route(route: &str) -> bool {
  let path = route.split(['?', '#']).next().unwrap_or(route).trim_end_matches('/');
  path == LOGIN_ROUTE || ALL_ROLES.iter().any(|role| path == role.login_path())
}

/// Navigator that only records where it was sent
#[derive(Debug)]
pub struct MemoryNavigator {
  current: Mutex<String>,
  history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
  pub fn new(initial: impl Into<String>) -> Self {
    Self {
      current: Mutex::new(initial.into()),
      history: Mutex::new(Vec::new()),
    }
  }

  /// Routes navigated to, oldest first
  pub fn history(&self) -> Vec<String> {
    self.history.lock().map(|h| h.clone()).unwrap_or_default()
  }
}

impl Navigator for MemoryNavigator {
  fn current_route(&self) -> String {
    self.current.lock().map(|c| c.clone()).unwrap_or_default()
  }

  fn navigate(&self, route: &str) {
    if let Ok(mut current) = self.current.lock() {
      *current = route.to_string();
    }
    if let Ok(mut history) = self.history.lock() {
      history.push(route.to_string());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_auth_routes() {
    assert!(is_auth_route("/login"));
    assert!(is_auth_route("/login/"));
    assert!(is_auth_route("/manager/login"));
    assert!(is_auth_route("/agent/login?next=/clients"));
    assert!(!is_auth_route("/clients"));
    assert!(!is_auth_route("/manager/dashboard"));
  }

  #[test]
  fn test_memory_navigator_records_history() {
    let nav = MemoryNavigator::new("/clients");
    assert_eq!(nav.current_route(), "/clients");

    nav.navigate("/login");
    assert_eq!(nav.current_route(), "/login");
    assert_eq!(nav.history(), vec!["/login".to_string()]);
  }
}
