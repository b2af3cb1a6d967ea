//! Core types and logic for the Lectio reading-plan engine.
//!
//! This crate is deliberately free of HTTP and database dependencies. Plan
//! documents arrive through a [`source::PlanSource`] and per-user progress
//! lives behind a [`progress::ProgressStore`]; everything in between is pure
//! computation over immutable plan tables.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod day_number;
pub mod error;
pub mod metadata;
pub mod normalize;
pub mod plan;
pub mod planner;
pub mod progress;
pub mod reading;
pub mod source;
pub mod stats;
pub mod table;

pub use error::{Error, Result};
pub use plan::{PlanType, Testament};
pub use planner::{InitReport, Planner};
