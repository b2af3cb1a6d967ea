//! Handlers for the user's progress: the current plan and completions.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/current-plan` | `{"plan":"nt90"}` |
//! | `PUT`  | `/current-plan` | Body: `{"plan":"ot365"}` |
//! | `POST` | `/completions` | Body: `{"plan"?, "day"?, "date"?}`; returns 201 + the stored completion |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use lectio_core::{PlanType, Planner, day_number::local_today, progress::ProgressStore};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, parse_plan};

// ─── Current plan ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentPlan {
  pub plan: PlanType,
}

/// `GET /current-plan`
pub async fn get_current<S>(
  State(planner): State<Arc<Planner<S>>>,
) -> Result<Json<CurrentPlan>, ApiError>
where
  S: ProgressStore,
{
  let plan = planner
    .store()
    .current_plan()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CurrentPlan { plan }))
}

#[derive(Debug, Deserialize)]
pub struct SwitchBody {
  pub plan: String,
}

/// `PUT /current-plan`, body: `{"plan":"..."}`
pub async fn put_current<S>(
  State(planner): State<Arc<Planner<S>>>,
  Json(body): Json<SwitchBody>,
) -> Result<Json<CurrentPlan>, ApiError>
where
  S: ProgressStore,
{
  let plan = parse_plan(&body.plan)?;
  planner.switch_plan(plan).await.map_err(ApiError::store)?;
  Ok(Json(CurrentPlan { plan }))
}

// ─── Completions ──────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /completions`. Omitted fields resolve to the
/// current plan and the day assigned to `date` (default today).
#[derive(Debug, Deserialize, Default)]
pub struct CompletionBody {
  pub plan: Option<String>,
  pub day:  Option<u32>,
  pub date: Option<NaiveDate>,
}

/// `POST /completions`. The body may be omitted. Returns 201 with the stored
/// completion.
pub async fn complete<S>(
  State(planner): State<Arc<Planner<S>>>,
  body: Option<Json<CompletionBody>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProgressStore,
{
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let plan = body.plan.as_deref().map(parse_plan).transpose()?;
  if body.day == Some(0) {
    return Err(ApiError::BadRequest("day numbers start at 1".into()));
  }

  let completion = planner
    .mark_completed(body.date.unwrap_or_else(local_today), plan, body.day)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(completion)))
}
