//! Fetches plan documents over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use lectio_core::{PlanType, source::PlanSource};
use reqwest::Client;
use serde_json::Value;

/// A [`PlanSource`] that performs `GET <base_url>/<plan>.json`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpSource {
  client:   Client,
  base_url: String,
}

impl HttpSource {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  pub fn url(&self, plan: PlanType) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), plan.document_name())
  }
}

impl PlanSource for HttpSource {
  type Error = reqwest::Error;

  async fn fetch(&self, plan: PlanType) -> Result<Value, reqwest::Error> {
    let url = self.url(plan);
    tracing::debug!(%plan, %url, "fetching plan");
    self
      .client
      .get(&url)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await
  }
}
