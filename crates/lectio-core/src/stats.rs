//! Progress statistics and reading-time estimates derived from plan
//! metadata.

use serde::{Deserialize, Serialize};

use crate::plan::PlanType;

/// Minutes budgeted per chapter when estimating daily reading time.
const MINUTES_PER_CHAPTER: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
  pub plan:                 PlanType,
  pub total_days:           u32,
  /// Raw count of completed readings; may exceed `total_days`.
  pub completed:            u32,
  /// Rounded completion percentage, clamped to 100.
  pub percent:              u32,
  pub remaining:            u32,
  pub avg_chapters_per_day: f64,
}

pub fn stats(plan: PlanType, completed: u32) -> ReadingStats {
  let meta = plan.metadata();
  let total = meta.cycle_length_days;
  let percent = (100.0 * f64::from(completed) / f64::from(total)).round().min(100.0);

  ReadingStats {
    plan,
    total_days: total,
    completed,
    percent: percent as u32,
    remaining: total.saturating_sub(completed),
    avg_chapters_per_day: meta.avg_chapters_per_day,
  }
}

/// A `"{m}-{m+10} min"` range, where `m` is the plan's average chapter count
/// at five minutes a chapter, rounded up.
pub fn suggested_time(plan: PlanType) -> String {
  let low = (plan.metadata().avg_chapters_per_day * MINUTES_PER_CHAPTER).ceil() as u32;
  format!("{low}-{} min", low + 10)
}
