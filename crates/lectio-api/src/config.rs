//! Runtime server configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Deserialised from `config.toml` and `LECTIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite file holding start dates and completions.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Directory containing `nt90.json`, `ot365.json` and `ethiopian.json`.
  #[serde(default = "default_plan_dir")]
  pub plan_dir:   PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5233 }

fn default_store_path() -> PathBuf { PathBuf::from("lectio.db") }

fn default_plan_dir() -> PathBuf { PathBuf::from("plans") }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `LECTIO_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("LECTIO"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
