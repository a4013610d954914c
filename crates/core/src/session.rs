//! Authenticated session state over an injected credential store.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::storage::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY, ROLE_KEY, SESSION_KEYS, USER_KEY};
use crate::{Result, Role};

/// Profile of the logged-in staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role: Option<Role>,
}

impl UserProfile {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
  pub access_token: String,
  pub refresh_token: String,
  pub role: Role,
  pub user: Option<UserProfile>,
}

/// Token pair returned by login and refresh endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
  pub access_token: String,
  pub refresh_token: String,
}

/// Reads and writes session keys, JSON-encoding every value
#[derive(Clone)]
pub struct SessionStore {
  store: Arc<dyn CredentialStore>,
}

impl SessionStore {
  pub fn new(store: Arc<dyn CredentialStore>) -> Self {
    Self { store }
  }

  fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    let Some(raw) = self.store.get(key)? else {
      return Ok(None);
    };

    match serde_json::from_str(&raw) {
      Ok(value) => Ok(Some(value)),
      // Values written by older clients were not JSON-encoded
      Err(_) => match serde_json::from_value(serde_json::Value::String(raw)) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
          warn!("Discarding unreadable value under {}: {}", key, e);
          Ok(None)
        }
      },
    }
  }

  fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
    self.store.set(key, &serde_json::to_string(value)?)
  }

  pub fn access_token(&self) -> Result<Option<String>> {
    self.read(ACCESS_TOKEN_KEY)
  }

  pub fn refresh_token(&self) -> Result<Option<String>> {
    self.read(REFRESH_TOKEN_KEY)
  }

  pub fn role(&self) -> Result<Option<Role>> {
    self.read(ROLE_KEY)
  }

  pub fn user(&self) -> Result<Option<UserProfile>> {
    self.read(USER_KEY)
  }

  /// Store a refreshed token pair, leaving role and user untouched
  pub fn store_tokens(&self, tokens: &TokenPair) -> Result<()> {
    self.write(ACCESS_TOKEN_KEY, &tokens.access_token)?;
    self.write(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
    debug!("Stored refreshed token pair");
    Ok(())
  }

  pub fn save(&self, session: &Session) -> Result<()> {
    self.write(ACCESS_TOKEN_KEY, &session.access_token)?;
    self.write(REFRESH_TOKEN_KEY, &session.refresh_token)?;
    self.write(ROLE_KEY, &session.role)?;
    match &session.user {
      Some(user) => self.write(USER_KEY, user)?,
      None => self.store.remove(USER_KEY)?,
    }
    info!("Session saved for role {}", session.role);
    Ok(())
  }

  /// Full session, if both tokens and the role are present
  pub fn load(&self) -> Result<Option<Session>> {
    let (Some(access_token), Some(refresh_token), Some(role)) =
      (self.access_token()?, self.refresh_token()?, self.role()?)
    else {
      return Ok(None);
    };

    Ok(Some(Session {
      access_token,
      refresh_token,
      role,
      user: self.user()?,
    }))
  }

  /// Remove every stored credential
  pub fn clear(&self) -> Result<()> {
    for key in SESSION_KEYS {
      self.store.remove(key)?;
    }
    info!("Session cleared");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStore;
  use pretty_assertions::assert_eq;

  fn session() -> Session {
    Session {
      access_token: "access-1".to_string(),
      refresh_token: "refresh-1".to_string(),
      role: Role::Manager,
      user: Some(UserProfile {
        id: "u1".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        email: "ada@example.com".to_string(),
        role: Some(Role::Manager),
      }),
    }
  }

  #[test]
  fn test_values_are_json_stringified() {
    let raw = Arc::new(MemoryStore::new());
    let store = SessionStore::new(raw.clone());
    store.save(&session()).unwrap();

    assert_eq!(raw.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("\"access-1\""));
    assert_eq!(raw.get(ROLE_KEY).unwrap().as_deref(), Some("\"manager\""));
    assert!(raw.get(USER_KEY).unwrap().unwrap().starts_with('{'));
  }

  #[test]
  fn test_save_and_load() {
    let store = SessionStore::new(Arc::new(MemoryStore::new()));
    store.save(&session()).unwrap();

    assert_eq!(store.load().unwrap(), Some(session()));
  }

  #[test]
  fn test_load_incomplete_is_none() {
    let raw = Arc::new(MemoryStore::new());
    raw.set(ACCESS_TOKEN_KEY, "\"a\"").unwrap();
    let store = SessionStore::new(raw);

    assert_eq!(store.load().unwrap(), None);
    assert_eq!(store.access_token().unwrap().as_deref(), Some("a"));
  }

  #[test]
  fn test_reads_legacy_unquoted_values() {
    let raw = Arc::new(MemoryStore::new());
    raw.set(REFRESH_TOKEN_KEY, "plain-token").unwrap();
    raw.set(ROLE_KEY, "director").unwrap();
    let store = SessionStore::new(raw);

    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("plain-token"));
    assert_eq!(store.role().unwrap(), Some(Role::Director));
  }

  #[test]
  fn test_unknown_role_reads_as_none() {
    let raw = Arc::new(MemoryStore::new());
    raw.set(ROLE_KEY, "\"cashier\"").unwrap();
    let store = SessionStore::new(raw);

    assert_eq!(store.role().unwrap(), None);
  }

  #[test]
  fn test_store_tokens_keeps_role() {
    let store = SessionStore::new(Arc::new(MemoryStore::new()));
    store.save(&session()).unwrap();
    store
      .store_tokens(&TokenPair {
        access_token: "access-2".to_string(),
        refresh_token: "refresh-2".to_string(),
      })
      .unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.access_token, "access-2");
    assert_eq!(loaded.refresh_token, "refresh-2");
    assert_eq!(loaded.role, Role::Manager);
  }

  #[test]
  fn test_clear_removes_everything() {
    let raw = Arc::new(MemoryStore::new());
    let store = SessionStore::new(raw.clone());
    store.save(&session()).unwrap();
    store.clear().unwrap();

    assert!(raw.is_empty());
    assert_eq!(store.load().unwrap(), None);
  }
}
