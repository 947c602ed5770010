//! sprintboard leaderboard command implementation

use std::path::Path;

use crate::error::Result;
use crate::leaderboard::{self, Leaderboard};
use crate::model::preferred_handle;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::pipeline::{aggregate_text, AggregateOptions};

use super::read_input;

pub fn run(input: &Path, options: AggregateOptions, output: OutputOptions) -> Result<()> {
    let text = read_input(input)?;
    let dashboard = aggregate_text(&text, options)?;
    let board = leaderboard::compute(&dashboard);

    emit_success(output, "leaderboard", &board, Some(&render(&board)))
}

pub(super) fn render(board: &Leaderboard) -> HumanOutput {
    let mut human = HumanOutput::new("sprintboard leaderboard");
    human.push_summary("members", board.member_count.to_string());
    human.push_summary("days tracked", board.days_tracked.to_string());
    human.push_summary("total points", board.total_points.to_string());

    for row in &board.rows {
        let handle = preferred_handle(row.username.as_deref(), row.name.as_deref());
        human.push_detail(format!(
            "{}. {} {} - {} pts, {} tasks, {:.2} avg",
            row.rank, handle, row.color, row.total_points, row.total_tasks, row.avg_points_per_task
        ));
    }
    if board.rows.is_empty() {
        human.push_warning("no assigned tasks found");
    }
    human
}
