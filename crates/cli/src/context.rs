//! Per-invocation wiring: config, session storage, API client.

use anyhow::{Context as _, Result};
use api::{ApiClient, Uploader};
use loandesk_core::{Config, CredentialStore, FileStore, MemoryStore, Role, Section, SessionBackend, SessionStore};
use std::sync::Arc;
use tracing::debug;

use crate::navigator::TerminalNavigator;

pub struct AppContext {
  pub config: Config,
  pub api: ApiClient,
  pub navigator: Arc<TerminalNavigator>,
}

impl AppContext {
  /// Build the context for a command standing in for `route`
  pub fn new(config: Config, route: &str) -> Result<Self> {
    let store: Arc<dyn CredentialStore> = match config.session.backend {
      SessionBackend::File => {
        let path = config.session.session_path();
        Arc::new(FileStore::open(&path).with_context(|| format!("Failed to open session file {}", path.display()))?)
      }
      SessionBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let navigator = Arc::new(TerminalNavigator::new(route));
    let api = ApiClient::new(&config.api, SessionStore::new(store), navigator.clone())
      .context("Failed to build HTTP client")?;
    debug!("API root: {}", api.url(""));

    Ok(Self { config, api, navigator })
  }

  pub fn load(route: &str) -> Result<Self> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    Self::new(Config::load_for_project(&cwd), route)
  }

  /// Refuse early when the logged-in role cannot see `section`
  pub fn require(&self, section: Section) -> Result<Role> {
    Ok(self.api.require_section(section)?)
  }

  pub fn uploader(&self) -> Result<Option<Uploader>> {
    Ok(Uploader::from_config(&self.config.upload)?)
  }

  pub fn uploader_required(&self) -> Result<Uploader> {
    self.uploader()?.context("Uploads need upload.cloud_name and upload.upload_preset in the config")
  }
}

/// Staff section that lists members of `role`
pub fn staff_section(role: Role) -> Section {
  match role {
    Role::Director => Section::Directors,
    Role::Manager => Section::Managers,
    Role::CreditAgent => Section::CreditAgents,
  }
}
