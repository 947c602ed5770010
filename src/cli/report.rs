//! sprintboard report / series command implementations

use std::path::Path;

use crate::error::Result;
use crate::flatten::RegisteredUser;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::pipeline::{aggregate_text, AggregateOptions, Dashboard};
use crate::series::TimeSeriesPoint;

use super::read_input;

pub fn run_report(input: &Path, options: AggregateOptions, output: OutputOptions) -> Result<()> {
    let text = read_input(input)?;
    let dashboard = aggregate_text(&text, options)?;

    let mut human = HumanOutput::new("sprintboard report");
    push_overview(&mut human, &dashboard);
    for (index, user) in dashboard.ranked_users.iter().enumerate() {
        let totals = dashboard.aggregate_for(&user.id);
        let top = dashboard.top_tasks_for(&user.id);
        let best = top
            .first()
            .map(|task| format!(", top: {} ({} pts)", task.title, task.points))
            .unwrap_or_default();
        human.push_detail(format!(
            "{}. {} {}: {} pts / {} tasks{best}",
            index + 1,
            user.display_name(),
            user.color,
            totals.total_points,
            totals.total_tasks,
        ));
    }
    if dashboard.user_registry.is_empty() {
        human.push_next_step("assign tasks to users to populate the report");
    }

    emit_success(output, "report", &dashboard, Some(&human))
}

pub fn run_series(input: &Path, options: AggregateOptions, output: OutputOptions) -> Result<()> {
    let text = read_input(input)?;
    let dashboard = aggregate_text(&text, options)?;

    let mut human = HumanOutput::new("sprintboard series");
    push_overview(&mut human, &dashboard);
    for point in &dashboard.chart_series {
        human.push_detail(format_point(point, &dashboard.user_registry));
    }

    emit_success(output, "series", &dashboard.chart_series, Some(&human))
}

fn push_overview(human: &mut HumanOutput, dashboard: &Dashboard) {
    human.push_summary("members", dashboard.user_registry.len().to_string());
    human.push_summary("days tracked", dashboard.chart_series.len().to_string());
    if let (Some(first), Some(last)) = (
        dashboard.chart_series.first(),
        dashboard.chart_series.last(),
    ) {
        human.push_summary("range", format!("{} .. {}", first.day, last.day));
    }
}

/// `2023-10-01  anv 5 pts/1 tasks  btt 0 pts/0 tasks`
fn format_point(point: &TimeSeriesPoint, users: &[RegisteredUser]) -> String {
    let mut line = point.day.to_string();
    for user in users {
        let totals = point.totals_for(&user.id).unwrap_or_default();
        line.push_str(&format!(
            "  {} {} pts/{} tasks",
            user.display_name(),
            totals.total_points,
            totals.total_tasks
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::parse_timestamp;

    #[test]
    fn formats_point_for_every_user() {
        let text = r#"[{"title": "S1", "tasks": [
            {"id": 1, "created": "2023-10-01T10:00:00Z", "labels": [{"title": "5 POINTS"}],
             "assignees": [{"id": 1, "name": "A", "username": "anv"}]},
            {"id": 2, "created": "2023-10-02T10:00:00Z", "labels": [{"title": "8 POINTS"}],
             "assignees": [{"id": 2, "name": "B", "username": "btt"}]}
        ]}]"#;
        let now = parse_timestamp("2023-10-09T00:00:00Z").expect("clock");
        let dashboard = aggregate_text(text, AggregateOptions::at(now)).expect("dashboard");

        assert_eq!(
            format_point(&dashboard.chart_series[0], &dashboard.user_registry),
            "2023-10-01  anv 5 pts/1 tasks  btt 0 pts/0 tasks"
        );
    }
}
