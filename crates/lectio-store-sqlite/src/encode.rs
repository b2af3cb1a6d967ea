//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! plan types by their wire name and UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use lectio_core::{PlanType, progress::CompletedReading};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── PlanType ────────────────────────────────────────────────────────────────

pub fn encode_plan(p: PlanType) -> &'static str { p.as_str() }

pub fn decode_plan(s: &str) -> Result<PlanType> { Ok(s.parse::<PlanType>()?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `completions` row.
pub struct RawCompletion {
  pub completion_id: String,
  pub plan:          String,
  pub day:           i64,
  pub completed_at:  String,
}

impl RawCompletion {
  pub fn into_completion(self) -> Result<CompletedReading> {
    Ok(CompletedReading {
      completion_id: decode_uuid(&self.completion_id)?,
      plan:          decode_plan(&self.plan)?,
      day:           u32::try_from(self.day).map_err(|_| Error::DayOutOfRange(self.day))?,
      completed_at:  decode_dt(&self.completed_at)?,
    })
  }
}
