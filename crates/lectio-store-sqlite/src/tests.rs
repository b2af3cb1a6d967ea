//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use lectio_core::{PlanType, Planner, progress::ProgressStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Current plan ────────────────────────────────────────────────────────────

#[tokio::test]
async fn current_plan_defaults_to_nt90() {
  let s = store().await;
  assert_eq!(s.current_plan().await.unwrap(), PlanType::Nt90);
}

#[tokio::test]
async fn set_current_plan_overwrites() {
  let s = store().await;
  s.set_current_plan(PlanType::Ot365).await.unwrap();
  s.set_current_plan(PlanType::Ethiopian).await.unwrap();
  assert_eq!(s.current_plan().await.unwrap(), PlanType::Ethiopian);
}

// ─── Start dates ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn start_date_missing_returns_none() {
  let s = store().await;
  assert!(s.start_date(PlanType::Ot365).await.unwrap().is_none());
}

#[tokio::test]
async fn start_date_roundtrip_and_reset() {
  let s = store().await;
  s.set_start_date(PlanType::Ot365, ymd(2024, 1, 1)).await.unwrap();
  assert_eq!(s.start_date(PlanType::Ot365).await.unwrap(), Some(ymd(2024, 1, 1)));

  s.set_start_date(PlanType::Ot365, ymd(2025, 2, 3)).await.unwrap();
  assert_eq!(s.start_date(PlanType::Ot365).await.unwrap(), Some(ymd(2025, 2, 3)));

  // Other plans are unaffected.
  assert!(s.start_date(PlanType::Nt90).await.unwrap().is_none());
}

// ─── Completions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn completions_roundtrip_in_order() {
  let s = store().await;
  let first = s.record_completion(PlanType::Nt90, 1).await.unwrap();
  let second = s.record_completion(PlanType::Ethiopian, 14).await.unwrap();

  let all = s.completed_readings().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].completion_id, first.completion_id);
  assert_eq!(all[0].plan, PlanType::Nt90);
  assert_eq!(all[1].completion_id, second.completion_id);
  assert_eq!(all[1].day, 14);
}

#[tokio::test]
async fn persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("progress.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.set_start_date(PlanType::Nt90, ymd(2024, 5, 1)).await.unwrap();
    s.record_completion(PlanType::Nt90, 1).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.start_date(PlanType::Nt90).await.unwrap(), Some(ymd(2024, 5, 1)));
  assert_eq!(s.completed_readings().await.unwrap().len(), 1);
}

// ─── Through the planner ─────────────────────────────────────────────────────

#[tokio::test]
async fn planner_adopts_start_date_into_sqlite() {
  let planner = Planner::new(store().await);
  let today = ymd(2024, 7, 4);

  let reading = planner.reading_for_date(today, Some(PlanType::Ot365)).await.unwrap();
  assert_eq!(reading.day, 1);
  assert!(reading.is_fallback);
  assert_eq!(
    planner.store().start_date(PlanType::Ot365).await.unwrap(),
    Some(today)
  );

  let stats = planner.reading_stats(PlanType::Ot365).await.unwrap();
  assert_eq!(stats.completed, 0);
  assert_eq!(stats.remaining, 365);
}
