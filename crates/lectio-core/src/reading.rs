//! Reading records: the normalized per-day unit and the assignment handed to
//! callers.

use serde::{Deserialize, Serialize};

use crate::plan::{PlanType, Testament};

/// Chapter count assumed when a plan document omits one.
pub const DEFAULT_CHAPTERS: u32 = 3;

// ─── Normalized record ───────────────────────────────────────────────────────

/// One day of a plan after normalization. Every plan shape collapses into
/// this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
  /// 1-based position in the plan's cycle. Unique within a table.
  pub day:          u32,
  /// Passage reference, e.g. `"Matthew 5-7"`.
  pub reading:      String,
  pub theme:        Option<String>,
  pub chapters:     u32,
  pub month:        Option<String>,
  pub focus:        Option<String>,
  pub feast:        Option<String>,
  /// Day within the month, for plans that number readings per month.
  pub day_of_month: Option<u32>,
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// The reading for one calendar date under one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingAssignment {
  pub plan:        PlanType,
  pub day:         u32,
  pub title:       String,
  pub passages:    Vec<String>,
  pub theme:       Option<String>,
  pub chapters:    u32,
  pub month:       Option<String>,
  pub focus:       Option<String>,
  pub feast:       Option<String>,
  /// Set when no plan data was available and the canned default was used.
  pub is_fallback: bool,
}

impl ReadingAssignment {
  /// Build the assignment for a record found in a loaded plan table.
  pub fn from_record(plan: PlanType, record: &DayRecord) -> Self {
    Self {
      plan,
      day: record.day,
      title: title_for(plan, record),
      passages: vec![record.reading.clone()],
      theme: record.theme.clone(),
      chapters: record.chapters,
      month: record.month.clone(),
      focus: record.focus.clone(),
      feast: record.feast.clone(),
      is_fallback: false,
    }
  }

  /// The fixed assignment used when a plan has no record for `day`.
  pub fn fallback(plan: PlanType, day: u32) -> Self {
    let (label, passage, theme, chapters) = match plan.testament() {
      Testament::New => ("NT90", "Matthew 1-4", "Birth & Early Ministry", 4),
      Testament::Old => ("OT365", "Genesis 1-3", "Creation & Fall", 3),
    };

    Self {
      plan,
      day,
      title: format!("{label} Day {day}"),
      passages: vec![passage.to_owned()],
      theme: Some(theme.to_owned()),
      chapters,
      month: None,
      focus: None,
      feast: None,
      is_fallback: true,
    }
  }
}

fn title_for(plan: PlanType, record: &DayRecord) -> String {
  if plan == PlanType::Ethiopian
    && let Some(month) = &record.month
  {
    let day = record.day_of_month.unwrap_or(record.day);
    return match &record.feast {
      Some(feast) => format!("{month} Day {day} - {feast}"),
      None => format!("{month} Day {day}"),
    };
  }

  match &record.theme {
    Some(theme) => format!("Day {}: {theme}", record.day),
    None => format!("Day {}", record.day),
  }
}
