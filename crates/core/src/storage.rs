//! Credential storage backends.
//!
//! Values are kept as JSON text: a token `abc` is stored as `"abc"` and the
//! user profile as a JSON object string.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::{Error, Result};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";
pub const USER_KEY: &str = "user";

pub const SESSION_KEYS: &[&str] = &[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USER_KEY];

/// Key/value persistence for session credentials
pub trait CredentialStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>>;
  fn set(&self, key: &str, value: &str) -> Result<()>;
  fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.read().map(|e| e.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

fn poisoned<T>(_: T) -> Error {
  Error::Storage("store lock poisoned".to_string())
}

impl CredentialStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self
      .entries
      .write()
      .map_err(poisoned)?
      .insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.entries.write().map_err(poisoned)?.remove(key);
    Ok(())
  }
}

/// Store backed by a single JSON object file
#[derive(Debug)]
pub struct FileStore {
  path: PathBuf,
  cache: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
  /// Open (or lazily create) the store at `path`
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let cache = if path.exists() {
      let content = std::fs::read_to_string(&path)?;
      if content.trim().is_empty() {
        BTreeMap::new()
      } else {
        serde_json::from_str(&content)?
      }
    } else {
      BTreeMap::new()
    };

    debug!("Opened credential store at {} ({} keys)", path.display(), cache.len());

    Ok(Self {
      path,
      cache: RwLock::new(cache),
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let tmp = self.path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
    std::fs::rename(&tmp, &self.path)?;
    Ok(())
  }
}

impl CredentialStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.cache.read().map_err(poisoned)?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let mut entries = self.cache.write().map_err(poisoned)?;
    entries.insert(key.to_string(), value.to_string());
    self.persist(&entries)
  }

  fn remove(&self, key: &str) -> Result<()> {
    let mut entries = self.cache.write().map_err(poisoned)?;
    if entries.remove(key).is_some() {
      self.persist(&entries)?;
    }
    Ok(())
  }
}
