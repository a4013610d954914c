//! Configuration commands

use anyhow::{Result, bail};
use loandesk_core::Config;

pub async fn cmd_config_show() -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config = Config::load_for_project(&cwd);

  let project_config = Config::project_config_path(&cwd);
  let user_config = Config::user_config_path();

  if project_config.exists() {
    println!("Using project config: {:?}", project_config);
  } else if let Some(user_path) = user_config.filter(|p| p.exists()) {
    println!("Using user config: {:?}", user_path);
  } else {
    println!("Using default configuration (no config file found)");
  }
  println!("API root: {}", config.api.root_url());
  println!("Session:  {}", config.session.session_path().display());
  println!();

  println!("{}", toml::to_string_pretty(&config)?);
  Ok(())
}

/// Write a commented config template, to the project or the user location
pub async fn cmd_config_init(user: bool, force: bool) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config_path = if user {
    match Config::user_config_path() {
      Some(path) => path,
      None => bail!("Could not determine the user config directory"),
    }
  } else {
    Config::project_config_path(&cwd)
  };

  if config_path.exists() && !force {
    bail!(
      "Config file already exists: {:?} (use --force to overwrite)",
      config_path
    );
  }

  if let Some(parent) = config_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&config_path, Config::generate_template())?;

  println!("Created config: {:?}", config_path);
  println!("Edit the file to point api.base_url at your server.");
  Ok(())
}
