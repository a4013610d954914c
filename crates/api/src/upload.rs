//! Document and photo uploads to the hosting provider.
//!
//! Uploads go straight to the provider with an unsigned preset; they never
//! carry the API bearer token.

use loandesk_core::{DocumentRef, UploadConfig};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::request::failure_message;
use crate::ApiError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
  secure_url: String,
  public_id: String,
}

#[derive(Debug, Clone)]
pub struct Uploader {
  http: reqwest::Client,
  config: UploadConfig,
}

impl Uploader {
  pub fn new(config: UploadConfig) -> Result<Self, ApiError> {
    let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
    Ok(Self { http, config })
  }

  /// `None` when no cloud name or preset is configured
  pub fn from_config(config: &UploadConfig) -> Result<Option<Self>, ApiError> {
    if config.is_configured() {
      Self::new(config.clone()).map(Some)
    } else {
      Ok(None)
    }
  }

  pub async fn upload(&self, path: &Path, name: &str) -> Result<DocumentRef, ApiError> {
    let bytes = tokio::fs::read(path)
      .await
      .map_err(|e| ApiError::Upload(format!("{}: {}", path.display(), e)))?;
    let file_name = path
      .file_name()
      .map(|f| f.to_string_lossy().into_owned())
      .unwrap_or_else(|| name.to_string());

    debug!("Uploading {} ({} bytes)", path.display(), bytes.len());

    let form = Form::new()
      .part("file", Part::bytes(bytes).file_name(file_name))
      .text("upload_preset", self.config.upload_preset.clone());

    let response = self
      .http
      .post(self.config.endpoint())
      .multipart(form)
      .send()
      .await
      .map_err(|e| {
        warn!("Upload of {} failed: {}", path.display(), e);
        ApiError::from(e)
      })?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      let message = failure_message(status, &body);
      warn!("Upload of {} rejected: {} - {}", path.display(), status, message);
      return Err(ApiError::Upload(message));
    }

    let uploaded: UploadResponse = serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    info!("Uploaded {} as {}", name, uploaded.public_id);

    Ok(DocumentRef {
      url: uploaded.secure_url,
      public_id: uploaded.public_id,
      name: name.to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_config_requires_preset() {
    let config = UploadConfig {
      cloud_name: "demo".to_string(),
      ..Default::default()
    };
    assert!(Uploader::from_config(&config).unwrap().is_none());

    let config = UploadConfig {
      cloud_name: "demo".to_string(),
      upload_preset: "unsigned".to_string(),
      ..Default::default()
    };
    assert!(Uploader::from_config(&config).unwrap().is_some());
  }

  #[tokio::test]
  async fn test_missing_file() {
    let uploader = Uploader::new(UploadConfig::default()).unwrap();
    let result = uploader.upload(Path::new("/nonexistent/id.pdf"), "ID document").await;
    assert!(matches!(result, Err(ApiError::Upload(_))));
  }
}
