//! lectio-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! plan documents from the configured directory, opens the SQLite progress
//! store, and serves the JSON API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use lectio_api::{ServerConfig, config::expand_tilde};
use lectio_core::{Planner, source::DirectorySource};
use lectio_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Lectio reading-plan server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to read configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let plan_dir = expand_tilde(&server_cfg.plan_dir);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Missing or malformed plans are not fatal: their readings fall back.
  let mut planner = Planner::new(store);
  let report = planner.init(&DirectorySource::new(&plan_dir)).await;
  tracing::info!(
    loaded = report.loaded.len(),
    failed = report.failed.len(),
    dir = %plan_dir.display(),
    "plans initialised"
  );

  let app = Router::new()
    .nest("/api", lectio_api::api_router(Arc::new(planner)))
    .layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
