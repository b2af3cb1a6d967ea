//! Handler for `GET /reading`.
//!
//! | Param | Default |
//! |-------|---------|
//! | `date` (`YYYY-MM-DD`) | today, local time |
//! | `plan` (`nt90`, `ot365`, `ethiopian`) | the current plan |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use lectio_core::{
  Planner,
  day_number::local_today,
  progress::ProgressStore,
  reading::ReadingAssignment,
};
use serde::Deserialize;

use crate::error::{ApiError, parse_plan};

#[derive(Debug, Deserialize, Default)]
pub struct ReadingParams {
  pub date: Option<NaiveDate>,
  pub plan: Option<String>,
}

/// `GET /reading[?date=...][&plan=...]`
pub async fn handler<S>(
  State(planner): State<Arc<Planner<S>>>,
  Query(params): Query<ReadingParams>,
) -> Result<Json<ReadingAssignment>, ApiError>
where
  S: ProgressStore,
{
  let plan = params.plan.as_deref().map(parse_plan).transpose()?;
  let date = params.date.unwrap_or_else(local_today);

  let reading = planner
    .reading_for_date(date, plan)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(reading))
}
