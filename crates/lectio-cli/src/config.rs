//! CLI settings: flags override the config file, which overrides defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
  #[serde(default)]
  pub store_path:  Option<PathBuf>,
  #[serde(default)]
  pub plan_source: Option<String>,
}

impl ConfigFile {
  pub fn read(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Where plan documents are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanLocation {
  Directory(PathBuf),
  Url(String),
}

impl PlanLocation {
  pub fn parse(raw: &str) -> Self {
    if raw.starts_with("http://") || raw.starts_with("https://") {
      PlanLocation::Url(raw.to_string())
    } else {
      PlanLocation::Directory(expand_tilde(Path::new(raw)))
    }
  }
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
  pub store_path: PathBuf,
  pub plans:      PlanLocation,
}

impl Settings {
  pub fn resolve(
    file: ConfigFile,
    store_path: Option<PathBuf>,
    plan_source: Option<String>,
  ) -> Self {
    let store_path = store_path
      .or(file.store_path)
      .map(|p| expand_tilde(&p))
      .unwrap_or_else(default_store_path);
    let plans = plan_source
      .or(file.plan_source)
      .unwrap_or_else(|| "plans".to_string());

    Self { store_path, plans: PlanLocation::parse(&plans) }
  }
}

fn default_store_path() -> PathBuf {
  expand_tilde(Path::new("~/.local/share/lectio/lectio.db"))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
