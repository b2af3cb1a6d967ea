//! JSON REST API for Lectio.
//!
//! Exposes an axum [`Router`] backed by a [`Planner`] over any
//! [`lectio_core::progress::ProgressStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lectio_api::api_router(Arc::new(planner)))
//! ```

pub mod config;
pub mod error;
pub mod plans;
pub mod progress;
pub mod readings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lectio_core::{Planner, progress::ProgressStore};

pub use config::ServerConfig;
pub use error::ApiError;

/// Build a fully-materialised API router for `planner`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(planner: Arc<Planner<S>>) -> Router<()>
where
  S: ProgressStore + 'static,
{
  Router::new()
    // Readings
    .route("/reading", get(readings::handler::<S>))
    // Plans
    .route("/plans", get(plans::list))
    .route("/plans/{plan}", get(plans::get_one::<S>))
    .route("/plans/{plan}/stats", get(plans::stats::<S>))
    .route("/plans/{plan}/suggested-time", get(plans::suggested_time::<S>))
    .route("/plans/{plan}/restart", post(plans::restart::<S>))
    // Progress
    .route(
      "/current-plan",
      get(progress::get_current::<S>).put(progress::put_current::<S>),
    )
    .route("/completions", post(progress::complete::<S>))
    .with_state(planner)
}
