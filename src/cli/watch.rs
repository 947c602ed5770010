//! sprintboard watch command implementation
//!
//! Re-reads the input on every debounced change and reprints the leaderboard.
//! Half-written JSON keeps the previous output; a document of the wrong shape
//! is reported and watching continues.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::leaderboard;
use crate::output::{emit_error, emit_success, OutputOptions};
use crate::pipeline::{DashboardSession, UpdateOutcome};
use crate::watch::watch_file;

/// Options for the watch command
pub struct WatchOptions {
    pub input: PathBuf,
    pub debounce_ms: u64,
    /// Fixed fallback clock; the wall clock is read per reload otherwise.
    pub pinned_now: Option<DateTime<Utc>>,
    pub top_limit: usize,
    pub output: OutputOptions,
}

pub fn run(options: WatchOptions) -> Result<()> {
    if !options.input.is_file() {
        return Err(Error::InvalidArgument(format!(
            "cannot watch {}: not a file",
            options.input.display()
        )));
    }

    let mut session = DashboardSession::with_top_limit(options.top_limit);
    let debounce = Duration::from_millis(options.debounce_ms);

    watch_file(&options.input, debounce, || {
        reload(&mut session, &options);
        ControlFlow::Continue(())
    })
}

fn reload(session: &mut DashboardSession, options: &WatchOptions) {
    let text = match std::fs::read_to_string(&options.input) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %options.input.display(), error = %err, "input unreadable");
            return;
        }
    };

    let now = options.pinned_now.unwrap_or_else(Utc::now);
    match session.update_at(&text, now) {
        Ok(UpdateOutcome::Updated) => {
            let board = leaderboard::compute(session.dashboard());
            let human = super::leaderboard::render(&board);
            if let Err(err) = emit_success(options.output, "watch", &board, Some(&human)) {
                tracing::warn!(error = %err, "failed to print leaderboard");
            }
        }
        Ok(UpdateOutcome::Retained) => {}
        Err(err) => {
            if let Err(print_err) = emit_error("watch", &err, options.output.json) {
                tracing::warn!(error = %print_err, "failed to print error");
            }
        }
    }
}
