//! sprintboard - sprint bucket analytics library
//!
//! Turns a JSON array of sprint buckets into the aggregates a dashboard
//! renders: a cumulative per-user points series, per-user totals, top tasks
//! and a points ranking.
//!
//! # Pipeline
//!
//! 1. `model`: loosely typed bucket/task/label/user input
//! 2. `flatten`: one event and one task record per (task, assignee)
//! 3. `series`: day-ordered fold into cumulative snapshots for every user
//! 4. `rank`: top tasks per user and users by total points
//! 5. `pipeline`: orchestration plus last-good retention across edits
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.sprintboard.toml`
//! - `error`: Error types and result aliases
//! - `points` / `day` / `color`: per-task and per-user derivations
//! - `leaderboard`: display rows with averages and summary counts
//! - `output`: human and JSON envelopes for CLI output
//! - `watch`: debounced recompute-on-change file watching

pub mod cli;
pub mod color;
pub mod config;
pub mod day;
pub mod error;
pub mod flatten;
pub mod leaderboard;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod points;
pub mod rank;
pub mod series;
pub mod watch;

pub use error::{Error, Result};
pub use pipeline::{aggregate, aggregate_text, parse_buckets, AggregateOptions, Dashboard};
