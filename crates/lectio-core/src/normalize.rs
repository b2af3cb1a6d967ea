//! Normalization of raw plan documents into [`PlanTable`]s.
//!
//! Each plan type ships in its own JSON shape:
//!
//! | Plan | Shape |
//! |------|-------|
//! | NT90 | `{"schedule": [day…]}`, a flat list |
//! | OT365 | `{"months": [{"month", "focus", "days": [day…]}]}`, global day numbers |
//! | Ethiopian | `{"months": [{"month", "feast", "readings": [day…]}]}`, day numbers relative to the month |
//!
//! The wrapping object is optional; a bare top-level array is accepted too.
//! Only the plan's own wrapper key is recognised.

use serde::Deserialize;
use serde_json::Value;

use crate::{
  Error, Result,
  plan::PlanType,
  reading::{DEFAULT_CHAPTERS, DayRecord},
  table::{PlanTable, TableBuilder},
};

// ─── Raw shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDay {
  day:      u32,
  reading:  String,
  theme:    Option<String>,
  chapters: Option<u32>,
  feast:    Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOtMonth {
  month: String,
  focus: Option<String>,
  days:  Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawEthiopianMonth {
  month:    String,
  feast:    Option<String>,
  readings: Vec<RawDay>,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Convert a raw plan document into a day-indexed table.
pub fn normalize(plan: PlanType, raw: &Value) -> Result<PlanTable> {
  match plan {
    PlanType::Nt90 => normalize_nt90(raw),
    PlanType::Ot365 => normalize_ot365(raw),
    PlanType::Ethiopian => normalize_ethiopian(raw),
  }
}

/// Unwrap the plan's `key` array (or a bare array) and deserialize each entry,
/// reporting the 1-based position of the first entry that fails.
fn parse<'a, T: Deserialize<'a>>(plan: PlanType, key: &str, raw: &'a Value) -> Result<Vec<T>> {
  let items = match raw {
    Value::Array(items) => items,
    Value::Object(map) => match map.get(key) {
      Some(Value::Array(items)) => items,
      Some(_) => return Err(Error::ingest(plan, format!("`{key}` is not an array"))),
      None => return Err(Error::ingest(plan, format!("expected a `{key}` array"))),
    },
    _ => return Err(Error::ingest(plan, format!("expected a `{key}` array"))),
  };

  items
    .iter()
    .enumerate()
    .map(|(i, item)| {
      T::deserialize(item).map_err(|e| Error::ingest(plan, format!("entry {}: {e}", i + 1)))
    })
    .collect()
}

fn normalize_nt90(raw: &Value) -> Result<PlanTable> {
  let plan = PlanType::Nt90;
  let mut builder = TableBuilder::new(plan);

  for entry in parse::<RawDay>(plan, "schedule", raw)? {
    let record = base_record(plan, entry.day, entry)?;
    builder.push(record);
  }

  Ok(builder.finish())
}

fn normalize_ot365(raw: &Value) -> Result<PlanTable> {
  let plan = PlanType::Ot365;
  let mut builder = TableBuilder::new(plan);

  for group in parse::<RawOtMonth>(plan, "months", raw)? {
    for entry in group.days {
      // OT365 documents carry their own global day numbers, which need not
      // be contiguous across month boundaries.
      let mut record = base_record(plan, entry.day, entry)?;
      record.month = Some(group.month.clone());
      record.focus = group.focus.clone();
      builder.push(record);
    }
  }

  Ok(builder.finish())
}

fn normalize_ethiopian(raw: &Value) -> Result<PlanTable> {
  let plan = PlanType::Ethiopian;
  let months = parse::<RawEthiopianMonth>(plan, "months", raw)?;
  let offsets = month_offsets(plan, &months)?;
  let mut builder = TableBuilder::new(plan);

  for (group, offset) in months.into_iter().zip(offsets) {
    let count = group.readings.len();
    for mut entry in group.readings {
      let day_of_month = entry.day;
      // A day past the month's end would collide with the next month.
      if day_of_month as usize > count {
        return Err(Error::ingest(
          plan,
          format!("{} day {day_of_month} exceeds its {count} readings", group.month),
        ));
      }
      let feast = entry.feast.take().or_else(|| group.feast.clone());
      let global = offset
        .checked_add(day_of_month)
        .ok_or_else(|| Error::ingest(plan, "day number overflow"))?;

      let mut record = base_record(plan, global, entry)?;
      record.month = Some(group.month.clone());
      record.feast = feast;
      record.day_of_month = Some(day_of_month);
      builder.push(record);
    }
  }

  Ok(builder.finish())
}

/// Day offset at which each month starts: the running total of the reading
/// counts of all earlier months.
fn month_offsets(plan: PlanType, months: &[RawEthiopianMonth]) -> Result<Vec<u32>> {
  let mut offsets = Vec::with_capacity(months.len());
  let mut total: u32 = 0;
  for group in months {
    offsets.push(total);
    let count = u32::try_from(group.readings.len())
      .map_err(|_| Error::ingest(plan, "too many readings in one month"))?;
    total = total
      .checked_add(count)
      .ok_or_else(|| Error::ingest(plan, "day number overflow"))?;
  }
  Ok(offsets)
}

/// Validate a raw entry and build its record under global day number `day`.
fn base_record(plan: PlanType, day: u32, entry: RawDay) -> Result<DayRecord> {
  if entry.day == 0 {
    return Err(Error::ingest(plan, "day numbers start at 1"));
  }
  if entry.reading.trim().is_empty() {
    return Err(Error::ingest(plan, format!("day {} has an empty reading", entry.day)));
  }
  let chapters = match entry.chapters {
    Some(0) => {
      return Err(Error::ingest(plan, format!("day {} has zero chapters", entry.day)));
    }
    Some(n) => n,
    None => DEFAULT_CHAPTERS,
  };

  Ok(DayRecord {
    day,
    reading: entry.reading,
    theme: entry.theme,
    chapters,
    month: None,
    focus: None,
    feast: entry.feast,
    day_of_month: None,
  })
}
