//! Static, read-only descriptions of each plan.

use serde::Serialize;

use crate::plan::PlanType;

/// Descriptive data for a plan. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanMetadata {
  pub plan:                 PlanType,
  pub display_name:         &'static str,
  pub cycle_length_days:    u32,
  pub description:          &'static str,
  pub total_chapters:       u32,
  pub avg_chapters_per_day: f64,
}

static NT90: PlanMetadata = PlanMetadata {
  plan:                 PlanType::Nt90,
  display_name:         "New Testament in 90 Days",
  cycle_length_days:    90,
  description:          "Read through the entire New Testament in 90 days.",
  total_chapters:       260,
  avg_chapters_per_day: 2.89,
};

static OT365: PlanMetadata = PlanMetadata {
  plan:                 PlanType::Ot365,
  display_name:         "Old Testament in a Year",
  cycle_length_days:    365,
  description:          "Read through the Old Testament over a full year, one month-long theme at a time.",
  total_chapters:       929,
  avg_chapters_per_day: 2.55,
};

static ETHIOPIAN: PlanMetadata = PlanMetadata {
  plan:                 PlanType::Ethiopian,
  display_name:         "Ethiopian Calendar Reading Plan",
  cycle_length_days:    365,
  description:          "A year of readings ordered by the Ethiopian months, with feast days marked.",
  total_chapters:       1189,
  avg_chapters_per_day: 3.26,
};

impl PlanMetadata {
  pub fn of(plan: PlanType) -> &'static PlanMetadata {
    match plan {
      PlanType::Nt90 => &NT90,
      PlanType::Ot365 => &OT365,
      PlanType::Ethiopian => &ETHIOPIAN,
    }
  }

  pub fn all() -> [&'static PlanMetadata; 3] { PlanType::ALL.map(Self::of) }
}
