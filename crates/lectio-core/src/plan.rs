//! The closed set of supported reading schedules.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, metadata::PlanMetadata};

/// One of the supported reading-plan variants.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
  /// The New Testament in 90 days, as a flat list.
  Nt90,
  /// The Old Testament in a year, grouped by month.
  Ot365,
  /// A year-long reading order labelled with Ethiopian months and feasts.
  Ethiopian,
}

/// Which half of the canon a plan draws from. Selects the fallback reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
  Old,
  New,
}

impl PlanType {
  pub const ALL: [PlanType; 3] = [PlanType::Nt90, PlanType::Ot365, PlanType::Ethiopian];

  /// Stable lowercase identifier used on the wire and in storage.
  pub fn as_str(self) -> &'static str {
    match self {
      PlanType::Nt90 => "nt90",
      PlanType::Ot365 => "ot365",
      PlanType::Ethiopian => "ethiopian",
    }
  }

  pub fn metadata(self) -> &'static PlanMetadata { PlanMetadata::of(self) }

  pub fn cycle_length(self) -> u32 { self.metadata().cycle_length_days }

  pub fn testament(self) -> Testament {
    match self {
      PlanType::Nt90 => Testament::New,
      PlanType::Ot365 | PlanType::Ethiopian => Testament::Old,
    }
  }

  /// File name of the plan document inside a plan directory or under a base
  /// URL.
  pub fn document_name(self) -> String { format!("{}.json", self.as_str()) }
}

impl fmt::Display for PlanType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PlanType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "nt90" | "nt" => Ok(PlanType::Nt90),
      "ot365" | "ot" => Ok(PlanType::Ot365),
      "ethiopian" => Ok(PlanType::Ethiopian),
      _ => Err(Error::UnknownPlanType(s.to_owned())),
    }
  }
}
