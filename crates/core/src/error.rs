use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Not found: {entity} {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("Validation: {0}")]
  Validation(String),

  #[error("Storage: {0}")]
  Storage(String),

  #[error("Config: {0}")]
  Config(String),

  #[error("Serialization: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("IO: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
