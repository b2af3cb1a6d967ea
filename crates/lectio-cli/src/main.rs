//! `lectio`: command-line front end for the reading-plan engine.
//!
//! # Usage
//!
//! ```text
//! lectio today
//! lectio --plans https://example.org/plans show 2024-03-31 --plan nt90
//! lectio done
//! ```

mod client;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::HttpSource;
use config::{ConfigFile, PlanLocation, Settings};
use lectio_core::{
  PlanType, Planner, day_number::local_today, progress::ProgressStore, source::DirectorySource,
};
use lectio_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lectio", about = "Daily Bible reading plans")]
struct Args {
  /// Path to a TOML config file (store_path, plan_source).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite file for progress (default: ~/.local/share/lectio/lectio.db).
  #[arg(long, env = "LECTIO_STORE")]
  store: Option<PathBuf>,

  /// Directory or base URL serving the plan documents (default: ./plans).
  #[arg(long, env = "LECTIO_PLANS")]
  plans: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show today's reading.
  Today {
    #[arg(long)]
    plan: Option<PlanType>,
  },
  /// Show the reading assigned to a date (YYYY-MM-DD).
  Show {
    date: NaiveDate,
    #[arg(long)]
    plan: Option<PlanType>,
  },
  /// List the available plans.
  Plans,
  /// Describe one plan.
  Info { plan: PlanType },
  /// Show progress through a plan.
  Stats {
    #[arg(long)]
    plan: Option<PlanType>,
  },
  /// Make a plan the current one.
  Use { plan: PlanType },
  /// Start a plan over, with day 1 on `--date` (default: today).
  Restart {
    #[arg(long)]
    plan: Option<PlanType>,
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Mark a reading as completed (default: today's).
  Done {
    #[arg(long)]
    plan: Option<PlanType>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    day: Option<u32>,
  },
}

impl Command {
  /// Whether the command resolves readings and so needs plan documents.
  fn needs_plans(&self) -> bool {
    match self {
      Command::Today { .. } | Command::Show { .. } => true,
      Command::Done { plan, day } => plan.is_none() || day.is_none(),
      _ => false,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so they never mix with command output.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::read(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(file_cfg, args.store, args.plans);

  if let Some(parent) = settings.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", settings.store_path.display()))?;

  let mut planner = Planner::new(store);
  if args.command.needs_plans() {
    let report = match &settings.plans {
      PlanLocation::Directory(dir) => planner.init(&DirectorySource::new(dir)).await,
      PlanLocation::Url(url) => planner.init(&HttpSource::new(url.as_str())?).await,
    };
    tracing::debug!(loaded = report.loaded.len(), failed = report.failed.len(), "plans loaded");
  }

  run(&planner, args.command).await
}

async fn run(planner: &Planner<SqliteStore>, command: Command) -> Result<()> {
  match command {
    Command::Today { plan } => {
      let reading = planner.today(plan).await?;
      print!("{}", output::reading(&reading, &planner.suggested_time(reading.plan)));
    }
    Command::Show { date, plan } => {
      let reading = planner.reading_for_date(date, plan).await?;
      print!("{}", output::reading(&reading, &planner.suggested_time(reading.plan)));
    }
    Command::Plans => {
      let current = planner.store().current_plan().await?;
      for plan in PlanType::ALL {
        let marker = if plan == current { "*" } else { " " };
        let meta = plan.metadata();
        println!("{marker} {:<10} {} ({} days)", plan, meta.display_name, meta.cycle_length_days);
      }
    }
    Command::Info { plan } => {
      print!("{}", output::plan_info(planner.plan_info(plan)));
    }
    Command::Stats { plan } => {
      let plan = resolve_plan(planner, plan).await?;
      print!("{}", output::stats(&planner.reading_stats(plan).await?));
    }
    Command::Use { plan } => {
      planner.switch_plan(plan).await?;
      println!("Now reading {}", plan.metadata().display_name);
    }
    Command::Restart { plan, date } => {
      let plan = resolve_plan(planner, plan).await?;
      let date = date.unwrap_or_else(local_today);
      planner.restart_plan(plan, date).await?;
      println!("{plan} restarted; day 1 is {date}");
    }
    Command::Done { plan, day } => {
      let done = planner.mark_completed(local_today(), plan, day).await?;
      println!("Marked {} day {} as read", done.plan, done.day);
    }
  }
  Ok(())
}

async fn resolve_plan(planner: &Planner<SqliteStore>, plan: Option<PlanType>) -> Result<PlanType> {
  match plan {
    Some(plan) => Ok(plan),
    None => Ok(planner.store().current_plan().await?),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_plan_arguments() {
    let args = Args::try_parse_from(["lectio", "show", "2024-03-31", "--plan", "NT90"]).unwrap();
    match args.command {
      Command::Show { date, plan } => {
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(plan, Some(PlanType::Nt90));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn rejects_unknown_plan() {
    assert!(Args::try_parse_from(["lectio", "use", "psalms"]).is_err());
    assert!(Args::try_parse_from(["lectio", "done", "--day", "0"]).is_err());
  }

  #[test]
  fn only_reading_commands_load_plans() {
    assert!(Command::Today { plan: None }.needs_plans());
    assert!(!Command::Plans.needs_plans());
    assert!(!Command::Done { plan: Some(PlanType::Nt90), day: Some(4) }.needs_plans());
    assert!(Command::Done { plan: Some(PlanType::Nt90), day: None }.needs_plans());
  }
}
