//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use lectio_core::{metadata::PlanMetadata, reading::ReadingAssignment, stats::ReadingStats};

pub fn reading(r: &ReadingAssignment, suggested_time: &str) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{}", r.title);
  let _ = writeln!(out, "{}", "=".repeat(r.title.chars().count()));
  let _ = writeln!(out, "Read:     {}", r.passages.join("; "));
  if let Some(theme) = &r.theme {
    let _ = writeln!(out, "Theme:    {theme}");
  }
  if let Some(focus) = &r.focus {
    let _ = writeln!(out, "Focus:    {focus}");
  }
  if let Some(feast) = &r.feast {
    let _ = writeln!(out, "Feast:    {feast}");
  }
  let _ = writeln!(out, "Chapters: {} (about {suggested_time})", r.chapters);
  if r.is_fallback {
    let _ = writeln!(out, "\n(plan data unavailable; showing the default reading)");
  }
  out
}

pub fn plan_info(meta: &PlanMetadata) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{} [{}]", meta.display_name, meta.plan);
  let _ = writeln!(out, "{}", meta.description);
  let _ = writeln!(
    out,
    "{} days, {} chapters, {:.2} chapters/day",
    meta.cycle_length_days, meta.total_chapters, meta.avg_chapters_per_day
  );
  out
}

pub fn stats(s: &ReadingStats) -> String {
  format!(
    "{}: {}/{} days ({}%), {} remaining\n",
    s.plan, s.completed, s.total_days, s.percent, s.remaining
  )
}
