//! Error types for `lectio-core`.

use thiserror::Error;

use crate::plan::PlanType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown plan type: {0:?}")]
  UnknownPlanType(String),

  #[error("failed to ingest {plan} plan: {reason}")]
  Ingest { plan: PlanType, reason: String },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn ingest(plan: PlanType, reason: impl Into<String>) -> Self {
    Self::Ingest { plan, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
