//! Plan tables and the [`PlanStore`] that holds one per plan type.

use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{info, warn};

use crate::{
  Result,
  normalize::normalize,
  plan::PlanType,
  reading::DayRecord,
};

// ─── Table ───────────────────────────────────────────────────────────────────

/// Day-indexed records for one plan. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTable {
  records: BTreeMap<u32, DayRecord>,
}

impl PlanTable {
  pub fn get(&self, day: u32) -> Option<&DayRecord> { self.records.get(&day) }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Records in ascending day order.
  pub fn iter(&self) -> impl Iterator<Item = &DayRecord> { self.records.values() }
}

/// Accumulates records for a [`PlanTable`], keeping the first record seen for
/// each day number.
pub(crate) struct TableBuilder {
  plan:    PlanType,
  records: BTreeMap<u32, DayRecord>,
}

impl TableBuilder {
  pub(crate) fn new(plan: PlanType) -> Self {
    Self { plan, records: BTreeMap::new() }
  }

  pub(crate) fn push(&mut self, record: DayRecord) {
    match self.records.entry(record.day) {
      Entry::Vacant(slot) => {
        slot.insert(record);
      }
      Entry::Occupied(existing) => {
        warn!(
          plan = %self.plan,
          day = record.day,
          kept = %existing.get().reading,
          skipped = %record.reading,
          "duplicate day number in plan document; keeping the first record"
        );
      }
    }
  }

  pub(crate) fn finish(self) -> PlanTable { PlanTable { records: self.records } }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The loaded plan tables. A plan that was never loaded (or whose every load
/// failed) simply has no table; lookups against it return `None`.
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
  tables: BTreeMap<PlanType, PlanTable>,
}

impl PlanStore {
  pub fn new() -> Self { Self::default() }

  /// Normalize `raw` and replace the table for `plan` wholesale.
  ///
  /// On error the previously loaded table (if any) is left untouched. Returns
  /// the number of records in the new table.
  pub fn load(&mut self, plan: PlanType, raw: &serde_json::Value) -> Result<usize> {
    let table = normalize(plan, raw)?;
    let count = table.len();
    self.install(plan, table);
    info!(%plan, records = count, "plan loaded");
    Ok(count)
  }

  /// Replace the table for `plan` with an already-built one.
  pub fn install(&mut self, plan: PlanType, table: PlanTable) {
    self.tables.insert(plan, table);
  }

  pub fn table(&self, plan: PlanType) -> Option<&PlanTable> { self.tables.get(&plan) }

  pub fn is_loaded(&self, plan: PlanType) -> bool {
    self.tables.get(&plan).is_some_and(|t| !t.is_empty())
  }

  pub fn lookup(&self, plan: PlanType, day: u32) -> Option<&DayRecord> {
    self.tables.get(&plan)?.get(day)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::Error;

  fn nt90_doc(readings: &[&str]) -> serde_json::Value {
    let schedule: Vec<_> = readings
      .iter()
      .enumerate()
      .map(|(i, r)| json!({ "day": i + 1, "reading": r }))
      .collect();
    json!({ "schedule": schedule })
  }

  #[test]
  fn lookup_on_unloaded_plan_is_none() {
    let store = PlanStore::new();
    assert!(!store.is_loaded(PlanType::Ot365));
    assert!(store.lookup(PlanType::Ot365, 1).is_none());
  }

  #[test]
  fn load_then_lookup() {
    let mut store = PlanStore::new();
    let count = store
      .load(PlanType::Nt90, &nt90_doc(&["Matthew 1-3", "Matthew 4-6"]))
      .unwrap();
    assert_eq!(count, 2);
    assert_eq!(store.lookup(PlanType::Nt90, 2).unwrap().reading, "Matthew 4-6");
    assert!(store.lookup(PlanType::Nt90, 3).is_none());
  }

  #[test]
  fn reload_replaces_whole_table() {
    let mut store = PlanStore::new();
    store
      .load(PlanType::Nt90, &nt90_doc(&["Matthew 1-3", "Matthew 4-6", "Matthew 7-9"]))
      .unwrap();
    store.load(PlanType::Nt90, &nt90_doc(&["Mark 1-3"])).unwrap();

    let table = store.table(PlanType::Nt90).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(1).unwrap().reading, "Mark 1-3");
    assert!(table.get(2).is_none());
  }

  #[test]
  fn failed_reload_keeps_previous_table() {
    let mut store = PlanStore::new();
    store.load(PlanType::Nt90, &nt90_doc(&["Matthew 1-3"])).unwrap();

    let err = store
      .load(PlanType::Nt90, &json!({ "unexpected": true }))
      .unwrap_err();
    assert!(matches!(err, Error::Ingest { plan: PlanType::Nt90, .. }));
    assert_eq!(store.lookup(PlanType::Nt90, 1).unwrap().reading, "Matthew 1-3");
  }

  #[test]
  fn plans_are_independent() {
    let mut store = PlanStore::new();
    store.load(PlanType::Nt90, &nt90_doc(&["Matthew 1-3"])).unwrap();
    assert!(store.load(PlanType::Ethiopian, &json!(42)).is_err());

    assert!(store.is_loaded(PlanType::Nt90));
    assert!(!store.is_loaded(PlanType::Ethiopian));
  }

  #[test]
  fn builder_keeps_first_duplicate() {
    let mut builder = TableBuilder::new(PlanType::Ot365);
    for reading in ["Genesis 1-3", "Exodus 1-3"] {
      builder.push(DayRecord {
        day: 5,
        reading: reading.into(),
        theme: None,
        chapters: 3,
        month: None,
        focus: None,
        feast: None,
        day_of_month: None,
      });
    }
    let table = builder.finish();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(5).unwrap().reading, "Genesis 1-3");
  }
}
