//! [`SqliteStore`]: the SQLite implementation of [`ProgressStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use lectio_core::{
  PlanType,
  progress::{CompletedReading, ProgressStore},
};

use crate::{
  Result,
  encode::{
    RawCompletion, decode_date, decode_plan, encode_date, encode_dt, encode_plan, encode_uuid,
  },
  schema::{CURRENT_PLAN_KEY, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Reading progress backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_setting(&self, key: &'static str) -> Result<Option<String>> {
    let value = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM settings WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  async fn put_setting(&self, key: &'static str, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for SqliteStore {
  type Error = crate::Error;

  // ── Current plan ──────────────────────────────────────────────────────────

  async fn current_plan(&self) -> Result<PlanType> {
    match self.get_setting(CURRENT_PLAN_KEY).await? {
      Some(s) => decode_plan(&s),
      None => Ok(PlanType::Nt90),
    }
  }

  async fn set_current_plan(&self, plan: PlanType) -> Result<()> {
    self.put_setting(CURRENT_PLAN_KEY, encode_plan(plan).to_owned()).await
  }

  // ── Start dates ───────────────────────────────────────────────────────────

  async fn start_date(&self, plan: PlanType) -> Result<Option<NaiveDate>> {
    let plan_str = encode_plan(plan);

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT start_date FROM plan_starts WHERE plan = ?1",
              rusqlite::params![plan_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_date).transpose()
  }

  async fn set_start_date(&self, plan: PlanType, date: NaiveDate) -> Result<()> {
    let plan_str = encode_plan(plan);
    let date_str = encode_date(date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO plan_starts (plan, start_date) VALUES (?1, ?2)
           ON CONFLICT(plan) DO UPDATE SET start_date = excluded.start_date",
          rusqlite::params![plan_str, date_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%plan, start = %date, "stored start date");
    Ok(())
  }

  // ── Completions ───────────────────────────────────────────────────────────

  async fn completed_readings(&self) -> Result<Vec<CompletedReading>> {
    let raws: Vec<RawCompletion> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT completion_id, plan, day, completed_at
           FROM completions
           ORDER BY completed_at, rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCompletion {
              completion_id: row.get(0)?,
              plan:          row.get(1)?,
              day:           row.get(2)?,
              completed_at:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompletion::into_completion).collect()
  }

  async fn record_completion(&self, plan: PlanType, day: u32) -> Result<CompletedReading> {
    let completion = CompletedReading::new(plan, day);

    let id_str   = encode_uuid(completion.completion_id);
    let plan_str = encode_plan(plan);
    let at_str   = encode_dt(completion.completed_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO completions (completion_id, plan, day, completed_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, plan_str, day, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(completion)
  }
}
