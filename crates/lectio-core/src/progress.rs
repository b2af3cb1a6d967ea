//! The `ProgressStore` trait and an in-memory implementation.
//!
//! The trait is implemented by storage backends (e.g. `lectio-store-sqlite`).
//! Higher layers (`lectio-api`, `lectio-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::PlanType;

// ─── Records ─────────────────────────────────────────────────────────────────

/// A reading the user marked as done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedReading {
  pub completion_id: Uuid,
  pub plan:          PlanType,
  pub day:           u32,
  pub completed_at:  DateTime<Utc>,
}

impl CompletedReading {
  pub fn new(plan: PlanType, day: u32) -> Self {
    Self {
      completion_id: Uuid::new_v4(),
      plan,
      day,
      completed_at: Utc::now(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Per-user reading progress: the selected plan, each plan's start date and
/// the completion history.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The plan the user is following. Defaults to [`PlanType::Nt90`] when
  /// nothing has been chosen yet.
  fn current_plan(&self) -> impl Future<Output = Result<PlanType, Self::Error>> + Send + '_;

  fn set_current_plan(
    &self,
    plan: PlanType,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Day 1 of `plan`, or `None` if the plan has never been started.
  fn start_date(
    &self,
    plan: PlanType,
  ) -> impl Future<Output = Result<Option<NaiveDate>, Self::Error>> + Send + '_;

  /// Set (or overwrite) day 1 of `plan`.
  fn set_start_date(
    &self,
    plan: PlanType,
    date: NaiveDate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every recorded completion, oldest first.
  fn completed_readings(
    &self,
  ) -> impl Future<Output = Result<Vec<CompletedReading>, Self::Error>> + Send + '_;

  /// Append a completion for `day` of `plan` and return the stored record.
  fn record_completion(
    &self,
    plan: PlanType,
    day: u32,
  ) -> impl Future<Output = Result<CompletedReading, Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct MemoryState {
  current:     Option<PlanType>,
  starts:      HashMap<PlanType, NaiveDate>,
  completions: Vec<CompletedReading>,
}

/// A process-local [`ProgressStore`]. Nothing survives a restart; useful for
/// tests and for embedding without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
  state: Mutex<MemoryState>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut state)
  }
}

impl ProgressStore for MemoryStore {
  type Error = Infallible;

  async fn current_plan(&self) -> Result<PlanType, Infallible> {
    Ok(self.with_state(|s| s.current.unwrap_or(PlanType::Nt90)))
  }

  async fn set_current_plan(&self, plan: PlanType) -> Result<(), Infallible> {
    self.with_state(|s| s.current = Some(plan));
    Ok(())
  }

  async fn start_date(&self, plan: PlanType) -> Result<Option<NaiveDate>, Infallible> {
    Ok(self.with_state(|s| s.starts.get(&plan).copied()))
  }

  async fn set_start_date(&self, plan: PlanType, date: NaiveDate) -> Result<(), Infallible> {
    self.with_state(|s| {
      s.starts.insert(plan, date);
    });
    Ok(())
  }

  async fn completed_readings(&self) -> Result<Vec<CompletedReading>, Infallible> {
    Ok(self.with_state(|s| s.completions.clone()))
  }

  async fn record_completion(&self, plan: PlanType, day: u32) -> Result<CompletedReading, Infallible> {
    let completion = CompletedReading::new(plan, day);
    self.with_state(|s| s.completions.push(completion.clone()));
    Ok(completion)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn current_plan_defaults_to_nt90() {
    let store = MemoryStore::new();
    assert_eq!(store.current_plan().await.unwrap(), PlanType::Nt90);

    store.set_current_plan(PlanType::Ethiopian).await.unwrap();
    assert_eq!(store.current_plan().await.unwrap(), PlanType::Ethiopian);
  }

  #[tokio::test]
  async fn start_dates_are_per_plan() {
    let store = MemoryStore::new();
    let date = NaiveDate::from_ymd_opt(2024, 9, 11).unwrap();
    store.set_start_date(PlanType::Ethiopian, date).await.unwrap();

    assert_eq!(store.start_date(PlanType::Ethiopian).await.unwrap(), Some(date));
    assert_eq!(store.start_date(PlanType::Nt90).await.unwrap(), None);
  }

  #[tokio::test]
  async fn completions_are_appended_in_order() {
    let store = MemoryStore::new();
    store.record_completion(PlanType::Nt90, 1).await.unwrap();
    store.record_completion(PlanType::Nt90, 2).await.unwrap();

    let done = store.completed_readings().await.unwrap();
    assert_eq!(done.iter().map(|c| c.day).collect::<Vec<_>>(), vec![1, 2]);
  }
}
