use loandesk_core::{Role, Section};
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  /// Credentials were rejected and could not be refreshed. The session is gone.
  #[error("Session expired, please log in again")]
  Unauthorized,

  /// Server or business error, carrying the server's message
  #[error("Server returned {status}: {message}")]
  Server { status: u16, message: String },

  #[error("Network error: {0}")]
  Network(String),

  #[error("Request timed out")]
  Timeout,

  #[error("Invalid response: {0}")]
  Decode(String),

  #[error("{role} cannot access {section}")]
  Forbidden { role: Role, section: Section },

  #[error("Not logged in")]
  NotLoggedIn,

  #[error("Invalid record id: {0:?}")]
  InvalidId(String),

  #[error("Upload failed: {0}")]
  Upload(String),

  #[error("Session storage: {0}")]
  Storage(#[from] loandesk_core::Error),
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      ApiError::Timeout
    } else if e.is_decode() {
      ApiError::Decode(e.to_string())
    } else {
      ApiError::Network(e.to_string())
    }
  }
}

impl ApiError {
  pub fn server(status: StatusCode, message: impl Into<String>) -> Self {
    ApiError::Server {
      status: status.as_u16(),
      message: message.into(),
    }
  }

  /// Text suitable for an error dialog
  pub fn user_message(&self) -> String {
    match self {
      ApiError::Server { message, .. } => message.clone(),
      ApiError::Network(_) | ApiError::Timeout => "Unable to reach the server. Please try again.".to_string(),
      other => other.to_string(),
    }
  }
}
