//! Command-line interface for sprintboard
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::day::parse_timestamp;
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::pipeline::AggregateOptions;

mod inspect;
mod leaderboard;
mod report;
mod top;
mod watch;

/// sprintboard - sprint bucket analytics
///
/// Turns a JSON array of sprint buckets into cumulative per-user point
/// series, top-task reports and a points leaderboard.
#[derive(Parser, Debug)]
#[command(name = "sprintboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a .sprintboard.toml (defaults to ./.sprintboard.toml when present)
    #[arg(long, global = true, env = "SPRINTBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fallback clock for tasks without a created date (RFC 3339)
    #[arg(long, global = true, env = "SPRINTBOARD_NOW")]
    pub now: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full dashboard bundle: series, registry, aggregates, top tasks, ranking
    Report {
        /// Bucket JSON file, or "-" for stdin
        input: PathBuf,
    },

    /// Cumulative per-user points and task counts by day
    Series {
        /// Bucket JSON file, or "-" for stdin
        input: PathBuf,
    },

    /// Highest-point tasks per user
    Top {
        /// Bucket JSON file, or "-" for stdin
        input: PathBuf,

        /// Only show this user id
        #[arg(long)]
        user: Option<String>,

        /// Tasks per user (overrides report.top_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Users ranked by total points
    Leaderboard {
        /// Bucket JSON file, or "-" for stdin
        input: PathBuf,
    },

    /// Recompute the leaderboard whenever the input file changes
    Watch {
        /// Bucket JSON file
        input: PathBuf,
    },

    /// Show the display colour derived for a username
    Color {
        /// Username (or name when the user has no username)
        handle: String,
    },

    /// Show the points parsed from a set of label titles
    Points {
        /// Label titles, in task order
        labels: Vec<String>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        let context = || RunContext::resolve(self.config.as_deref(), self.now.as_deref());

        match self.command {
            Commands::Report { input } => report::run_report(&input, context()?.aggregate, output),
            Commands::Series { input } => report::run_series(&input, context()?.aggregate, output),
            Commands::Top { input, user, limit } => top::run(top::TopOptions {
                input,
                user,
                limit,
                aggregate: context()?.aggregate,
                output,
            }),
            Commands::Leaderboard { input } => {
                leaderboard::run(&input, context()?.aggregate, output)
            }
            Commands::Watch { input } => {
                let context = context()?;
                watch::run(watch::WatchOptions {
                    input,
                    debounce_ms: context.config.watch.debounce_ms,
                    pinned_now: context.pinned_now,
                    top_limit: context.aggregate.top_limit,
                    output,
                })
            }
            Commands::Color { handle } => inspect::run_color(&handle, output),
            Commands::Points { labels } => inspect::run_points(&labels, output),
        }
    }
}

/// Config and clock shared by the commands that aggregate input.
struct RunContext {
    config: Config,
    aggregate: AggregateOptions,
    pinned_now: Option<DateTime<Utc>>,
}

impl RunContext {
    fn resolve(config_path: Option<&Path>, now: Option<&str>) -> Result<Self> {
        let config = Config::resolve(config_path)?;
        let pinned_now = now.map(parse_now).transpose()?;
        let aggregate = AggregateOptions {
            now: pinned_now.unwrap_or_else(Utc::now),
            top_limit: config.report.top_limit,
        };
        Ok(Self {
            config,
            aggregate,
            pinned_now,
        })
    }
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw.trim()).ok_or_else(|| {
        Error::InvalidArgument(format!("--now: expected an RFC 3339 timestamp, got '{raw}'"))
    })
}

/// Read the input buffer from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(|err| {
        Error::InvalidArgument(format!("cannot read {}: {err}", path.display()))
    })
}
