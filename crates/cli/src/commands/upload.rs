use anyhow::{Context, Result};
use std::path::Path;

use crate::context::AppContext;

/// Upload a single file and print the stored reference
pub async fn cmd_upload(path: &Path, name: Option<&str>) -> Result<()> {
  let ctx = AppContext::load("/")?;
  let uploader = ctx.uploader_required()?;

  let name = name
    .map(str::to_string)
    .or_else(|| path.file_name().map(|f| f.to_string_lossy().into_owned()))
    .unwrap_or_else(|| "document".to_string());

  let document = uploader
    .upload(path, &name)
    .await
    .with_context(|| format!("Failed to upload {}", path.display()))?;
  super::print_json(&document)
}
