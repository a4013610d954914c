//! Configuration system for LoanDesk with per-project overrides.
//!
//! Config priority: project-relative (.loandesk/config.toml) > user (~/.config/loandesk/config.toml)
//! Environment overrides (LOANDESK_API_URL, LOANDESK_UPLOAD_PRESET) apply last.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

// ============================================================================
// API Configuration
// ============================================================================

/// Back-office REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Server origin (e.g., "http://localhost:5000")
  pub base_url: String,

  /// Versioned base path appended to the origin (default: "/api/v1")
  pub prefix: String,

  /// Per-request timeout in seconds. Unset means no timeout.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:5000".to_string(),
      prefix: "/api/v1".to_string(),
      request_timeout_secs: None,
    }
  }
}

impl ApiConfig {
  /// Origin plus prefix, without a trailing slash
  pub fn root_url(&self) -> String {
    let base = self.base_url.trim_end_matches('/');
    let prefix = self.prefix.trim_matches('/');
    if prefix.is_empty() {
      base.to_string()
    } else {
      format!("{}/{}", base, prefix)
    }
  }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }
}

// ============================================================================
// Upload Configuration
// ============================================================================

/// Document/image hosting provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
  /// Provider API root (default: "https://api.cloudinary.com/v1_1")
  pub url: String,

  pub cloud_name: String,

  /// Unsigned upload preset sent in the form body
  pub upload_preset: String,

  /// Upload timeout in seconds (default: 300)
  pub timeout_secs: u64,
}

impl Default for UploadConfig {
  fn default() -> Self {
    Self {
      url: "https://api.cloudinary.com/v1_1".to_string(),
      cloud_name: String::new(),
      upload_preset: String::new(),
      timeout_secs: 300,
    }
  }
}

impl UploadConfig {
  pub fn endpoint(&self) -> String {
    format!("{}/{}/auto/upload", self.url.trim_end_matches('/'), self.cloud_name)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  pub fn is_configured(&self) -> bool {
    !self.cloud_name.is_empty() && !self.upload_preset.is_empty()
  }
}

// ============================================================================
// Session Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
  #[default]
  File,
  Memory,
}

/// Where credentials are kept between commands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
  pub backend: SessionBackend,

  /// Session file path (default: <data dir>/session.json)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<PathBuf>,
}

impl SessionConfig {
  pub fn session_path(&self) -> PathBuf {
    self.path.clone().unwrap_or_else(|| data_dir().join("session.json"))
  }
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: error, warn, info, debug, trace (default: warn)
  pub level: String,

  /// Also write logs to a file in the data directory
  pub file: bool,

  /// File rotation: daily, hourly, never (default: daily)
  pub rotation: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
      file: false,
      rotation: "daily".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// LoanDesk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,

  #[serde(default)]
  pub upload: UploadConfig,

  #[serde(default)]
  pub session: SessionConfig,

  #[serde(default)]
  pub logging: LoggingConfig,
}

/// Get the LoanDesk data directory (respects LOANDESK_DATA_DIR)
pub fn data_dir() -> PathBuf {
  if let Ok(path) = std::env::var("LOANDESK_DATA_DIR") {
    return PathBuf::from(path);
  }
  dirs::data_dir()
    .map(|p| p.join("loandesk"))
    .unwrap_or_else(|| PathBuf::from(".loandesk"))
}

impl Config {
  /// Load config for a project, with fallback to user config, then apply env overrides
  pub fn load_for_project(project_path: &Path) -> Self {
    let mut config = Self::load_file(&Self::project_config_path(project_path))
      .or_else(|| Self::user_config_path().and_then(|p| Self::load_file(&p)))
      .unwrap_or_default();
    config.apply_env();
    config
  }

  fn load_file(path: &Path) -> Option<Self> {
    if !path.exists() {
      return None;
    }
    match Self::from_file(path) {
      Ok(config) => Some(config),
      Err(e) => {
        tracing::warn!("Ignoring config at {}: {}", path.display(), e);
        None
      }
    }
  }

  /// Parse a config file, reporting errors
  pub fn from_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
  }

  fn apply_env(&mut self) {
    if let Ok(url) = std::env::var("LOANDESK_API_URL")
      && !url.is_empty()
    {
      self.api.base_url = url;
    }
    if let Ok(preset) = std::env::var("LOANDESK_UPLOAD_PRESET")
      && !preset.is_empty()
    {
      self.upload.upload_preset = preset;
    }
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("loandesk").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("loandesk").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(".loandesk").join("config.toml")
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    let defaults = Self::default();
    format!(
      r#"# LoanDesk Configuration
# Place in .loandesk/config.toml (project) or ~/.config/loandesk/config.toml (user)

# ============================================================================
# Back-office API
# ============================================================================

[api]
# Server origin (LOANDESK_API_URL overrides)
base_url = "{base_url}"

# Versioned base path
prefix = "{prefix}"

# Per-request timeout in seconds (no timeout when unset)
# request_timeout_secs = 30

# ============================================================================
# Document Uploads
# ============================================================================

[upload]
url = "{upload_url}"
cloud_name = ""

# Unsigned upload preset (LOANDESK_UPLOAD_PRESET overrides)
upload_preset = ""

# Upload timeout (seconds)
timeout_secs = {upload_timeout}

# ============================================================================
# Session Storage
# ============================================================================

[session]
# file (persist between commands) or memory (log in per command)
backend = "file"

# path = "/path/to/session.json"

# ============================================================================
# Logging
# ============================================================================

[logging]
# error, warn, info, debug, trace (RUST_LOG overrides)
level = "{level}"

# Write logs to <data dir>/loandesk.log as well
file = false

# daily, hourly, never
rotation = "{rotation}"
"#,
      base_url = defaults.api.base_url,
      prefix = defaults.api.prefix,
      upload_url = defaults.upload.url,
      upload_timeout = defaults.upload.timeout_secs,
      level = defaults.logging.level,
      rotation = defaults.logging.rotation,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.root_url(), "http://localhost:5000/api/v1");
    assert_eq!(config.api.request_timeout(), None);
    assert_eq!(config.upload.timeout(), Duration::from_secs(300));
    assert_eq!(config.session.backend, SessionBackend::File);
    assert_eq!(config.logging.level, "warn");
  }

  #[test]
  fn test_root_url_normalizes_slashes() {
    let api = ApiConfig {
      base_url: "https://loans.example.com/".to_string(),
      prefix: "/api/v2/".to_string(),
      request_timeout_secs: Some(10),
    };
    assert_eq!(api.root_url(), "https://loans.example.com/api/v2");
    assert_eq!(api.request_timeout(), Some(Duration::from_secs(10)));

    let bare = ApiConfig {
      prefix: String::new(),
      ..Default::default()
    };
    assert_eq!(bare.root_url(), "http://localhost:5000");
  }

  #[test]
  fn test_upload_endpoint() {
    let upload = UploadConfig {
      cloud_name: "demo".to_string(),
      upload_preset: "unsigned".to_string(),
      ..Default::default()
    };
    assert_eq!(upload.endpoint(), "https://api.cloudinary.com/v1_1/demo/auto/upload");
    assert!(upload.is_configured());
    assert!(!UploadConfig::default().is_configured());
  }

  #[test]
  fn test_load_project_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".loandesk");
    std::fs::create_dir_all(&dir).unwrap();

    let config_content = r#"
[api]
prefix = "/api/v2"

[session]
backend = "memory"
"#;
    std::fs::write(dir.join("config.toml"), config_content).unwrap();

    let config = Config::load_for_project(temp.path());
    assert_eq!(config.api.prefix, "/api/v2");
    assert_eq!(config.session.backend, SessionBackend::Memory);
    assert_eq!(config.upload.timeout_secs, 300);
  }

  #[test]
  fn test_from_file_reports_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
  }

  #[test]
  fn test_generate_template_parses() {
    let template = Config::generate_template();
    assert!(template.contains("[api]"));
    assert!(template.contains("[upload]"));
    assert!(template.contains("[session]"));
    assert!(template.contains("[logging]"));

    let parsed: Config = toml::from_str(&template).unwrap();
    assert_eq!(parsed.api.base_url, "http://localhost:5000");
    assert_eq!(parsed.upload.timeout_secs, 300);
  }

  #[test]
  fn test_toml_roundtrip() {
    let config = Config {
      api: ApiConfig {
        base_url: "https://loans.example.com".to_string(),
        request_timeout_secs: Some(15),
        ..Default::default()
      },
      session: SessionConfig {
        backend: SessionBackend::Memory,
        path: None,
      },
      ..Default::default()
    };

    let toml_str = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(parsed.api.base_url, "https://loans.example.com");
    assert_eq!(parsed.api.request_timeout_secs, Some(15));
    assert_eq!(parsed.session.backend, SessionBackend::Memory);
  }
}
