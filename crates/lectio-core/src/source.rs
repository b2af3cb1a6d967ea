//! Where plan documents come from.

use std::{
  future::Future,
  path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{Result, plan::PlanType};

/// A provider of raw plan documents, addressed by plan type.
pub trait PlanSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the raw document for `plan`. The shape is validated later, during
  /// normalization.
  fn fetch(&self, plan: PlanType) -> impl Future<Output = Result<Value, Self::Error>> + Send + '_;
}

/// Reads `<dir>/<plan>.json`, e.g. `plans/ot365.json`, through `tokio::fs`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
  dir: PathBuf,
}

impl DirectorySource {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }

  pub fn path_for(&self, plan: PlanType) -> PathBuf { self.dir.join(plan.document_name()) }
}

impl PlanSource for DirectorySource {
  type Error = crate::Error;

  async fn fetch(&self, plan: PlanType) -> Result<Value> {
    let raw = tokio::fs::read_to_string(self.path_for(plan)).await?;
    Ok(serde_json::from_str(&raw)?)
  }
}
