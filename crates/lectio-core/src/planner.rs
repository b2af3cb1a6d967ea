//! [`Planner`]: the reading resolver and the public face of the core.
//!
//! A planner owns the loaded [`PlanStore`] and a [`ProgressStore`]. Every
//! call takes the plan type explicitly (or reads the current plan from the
//! store), so nothing about "the active plan" lives in the planner itself.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
  day_number::{day_number, local_today},
  metadata::PlanMetadata,
  plan::PlanType,
  progress::{CompletedReading, ProgressStore},
  reading::ReadingAssignment,
  source::PlanSource,
  stats::{self, ReadingStats},
  table::PlanStore,
};

/// Outcome of [`Planner::init`], per plan type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
  /// Plans that loaded, with their record counts.
  pub loaded: BTreeMap<PlanType, usize>,
  /// Plans that failed to fetch or normalize, with the reason.
  pub failed: BTreeMap<PlanType, String>,
}

impl InitReport {
  pub fn is_complete(&self) -> bool { self.failed.is_empty() }
}

pub struct Planner<S> {
  plans: PlanStore,
  store: S,
}

impl<S: ProgressStore> Planner<S> {
  /// A planner with no plans loaded. Every lookup falls back until
  /// [`init`](Self::init) succeeds for that plan.
  pub fn new(store: S) -> Self { Self::with_plans(store, PlanStore::new()) }

  pub fn with_plans(store: S, plans: PlanStore) -> Self { Self { plans, store } }

  pub fn plans(&self) -> &PlanStore { &self.plans }

  pub fn store(&self) -> &S { &self.store }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Fetch and load every plan from `source`.
  ///
  /// The three documents are fetched concurrently. A failure affects only
  /// its own plan: the plan keeps whatever table it had before and lookups
  /// against it fall back.
  pub async fn init<P: PlanSource>(&mut self, source: &P) -> InitReport {
    let fetches = PlanType::ALL.map(move |plan| async move { (plan, source.fetch(plan).await) });
    let mut report = InitReport::default();

    for (plan, fetched) in join_all(fetches).await {
      let outcome = match fetched {
        Ok(raw) => self.plans.load(plan, &raw).map_err(|e| e.to_string()),
        Err(e) => Err(format!("failed to fetch {plan} plan: {e}")),
      };

      match outcome {
        Ok(count) => {
          report.loaded.insert(plan, count);
        }
        Err(reason) => {
          warn!(%plan, %reason, "plan unavailable; readings will fall back");
          report.failed.insert(plan, reason);
        }
      }
    }

    report
  }

  // ── Readings ──────────────────────────────────────────────────────────────

  /// The reading assigned to `date`.
  ///
  /// `plan` defaults to the store's current plan. If the plan has never been
  /// started, `date` becomes its day 1 and is written back to the store.
  /// Missing plan data never errors: the fixed fallback reading is returned
  /// instead. Only store failures surface.
  pub async fn reading_for_date(
    &self,
    date: NaiveDate,
    plan: Option<PlanType>,
  ) -> Result<ReadingAssignment, S::Error> {
    let plan = match plan {
      Some(plan) => plan,
      None => self.store.current_plan().await?,
    };

    let start = self.store.start_date(plan).await?;
    let position = day_number(date, start, plan.cycle_length());

    if let Some(adopted) = position.adopted_start {
      self.store.set_start_date(plan, adopted).await?;
      info!(%plan, start = %adopted, "plan started");
    }

    let assignment = match self.plans.lookup(plan, position.day) {
      Some(record) => ReadingAssignment::from_record(plan, record),
      None => {
        debug!(%plan, day = position.day, "no record for day; using fallback");
        ReadingAssignment::fallback(plan, position.day)
      }
    };

    debug!(%plan, %date, day = assignment.day, "resolved reading");
    Ok(assignment)
  }

  /// Today's reading, using the local date.
  pub async fn today(&self, plan: Option<PlanType>) -> Result<ReadingAssignment, S::Error> {
    self.reading_for_date(local_today(), plan).await
  }

  // ── Metadata & stats ──────────────────────────────────────────────────────

  pub fn plan_info(&self, plan: PlanType) -> &'static PlanMetadata { plan.metadata() }

  /// Progress through `plan`, counting every recorded completion.
  pub async fn reading_stats(&self, plan: PlanType) -> Result<ReadingStats, S::Error> {
    let completed = self.store.completed_readings().await?.len();
    Ok(stats::stats(plan, u32::try_from(completed).unwrap_or(u32::MAX)))
  }

  pub fn suggested_time(&self, plan: PlanType) -> String { stats::suggested_time(plan) }

  // ── Progress updates ──────────────────────────────────────────────────────

  /// Make `plan` the current plan.
  pub async fn switch_plan(&self, plan: PlanType) -> Result<(), S::Error> {
    self.store.set_current_plan(plan).await?;
    info!(%plan, "switched plan");
    Ok(())
  }

  /// Reset `plan` so that `date` is its day 1.
  pub async fn restart_plan(&self, plan: PlanType, date: NaiveDate) -> Result<(), S::Error> {
    self.store.set_start_date(plan, date).await?;
    info!(%plan, start = %date, "plan restarted");
    Ok(())
  }

  /// Record a completion. Without an explicit `day`, the day assigned to
  /// `date` is used.
  pub async fn mark_completed(
    &self,
    date: NaiveDate,
    plan: Option<PlanType>,
    day: Option<u32>,
  ) -> Result<CompletedReading, S::Error> {
    let (plan, day) = match (plan, day) {
      (Some(plan), Some(day)) => (plan, day),
      _ => {
        let reading = self.reading_for_date(date, plan).await?;
        (reading.plan, day.unwrap_or(reading.day))
      }
    };
    self.store.record_completion(plan, day).await
  }
}
