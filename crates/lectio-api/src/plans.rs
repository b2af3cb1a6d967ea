//! Handlers for `/plans` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/plans` | Metadata for every plan |
//! | `GET`  | `/plans/{plan}` | 400 for an unknown plan |
//! | `GET`  | `/plans/{plan}/stats` | Completion statistics |
//! | `GET`  | `/plans/{plan}/suggested-time` | e.g. `{"suggested_time":"15-25 min"}` |
//! | `POST` | `/plans/{plan}/restart` | Body: `{"date":"2024-01-01"}` (optional; defaults to today) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use lectio_core::{
  PlanType, Planner,
  day_number::local_today,
  metadata::PlanMetadata,
  progress::ProgressStore,
  stats::ReadingStats,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, parse_plan};

// ─── Metadata ─────────────────────────────────────────────────────────────────

/// `GET /plans`
pub async fn list() -> Json<[&'static PlanMetadata; 3]> { Json(PlanMetadata::all()) }

/// `GET /plans/{plan}`
pub async fn get_one<S>(
  State(planner): State<Arc<Planner<S>>>,
  Path(plan): Path<String>,
) -> Result<Json<&'static PlanMetadata>, ApiError>
where
  S: ProgressStore,
{
  Ok(Json(planner.plan_info(parse_plan(&plan)?)))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /plans/{plan}/stats`
pub async fn stats<S>(
  State(planner): State<Arc<Planner<S>>>,
  Path(plan): Path<String>,
) -> Result<Json<ReadingStats>, ApiError>
where
  S: ProgressStore,
{
  let stats = planner
    .reading_stats(parse_plan(&plan)?)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(stats))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestedTime {
  pub plan:           PlanType,
  pub suggested_time: String,
}

/// `GET /plans/{plan}/suggested-time`
pub async fn suggested_time<S>(
  State(planner): State<Arc<Planner<S>>>,
  Path(plan): Path<String>,
) -> Result<Json<SuggestedTime>, ApiError>
where
  S: ProgressStore,
{
  let plan = parse_plan(&plan)?;
  Ok(Json(SuggestedTime { plan, suggested_time: planner.suggested_time(plan) }))
}

// ─── Restart ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct RestartBody {
  pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Restarted {
  pub plan:       PlanType,
  pub start_date: NaiveDate,
}

/// `POST /plans/{plan}/restart`, body: `{"date":"..."}`. The body may be omitted.
pub async fn restart<S>(
  State(planner): State<Arc<Planner<S>>>,
  Path(plan): Path<String>,
  body: Option<Json<RestartBody>>,
) -> Result<Json<Restarted>, ApiError>
where
  S: ProgressStore,
{
  let plan = parse_plan(&plan)?;
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let start_date = body.date.unwrap_or_else(local_today);
  planner
    .restart_plan(plan, start_date)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Restarted { plan, start_date }))
}
