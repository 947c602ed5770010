//! Leaderboard rows and header figures derived from a dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::color::Color;
use crate::model::EntityId;
use crate::pipeline::Dashboard;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub id: EntityId,
    pub name: Option<String>,
    pub username: Option<String>,
    pub color: Color,
    pub total_points: u64,
    pub total_tasks: u64,
    pub avg_points_per_task: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub member_count: usize,
    pub days_tracked: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub total_points: u64,
    pub total_tasks: u64,
    pub rows: Vec<LeaderboardRow>,
}

pub fn compute(dashboard: &Dashboard) -> Leaderboard {
    let rows: Vec<LeaderboardRow> = dashboard
        .ranked_users
        .iter()
        .enumerate()
        .map(|(index, user)| {
            let aggregate = dashboard.aggregate_for(&user.id);
            LeaderboardRow {
                rank: index + 1,
                id: user.id.clone(),
                name: user.name.clone(),
                username: user.username.clone(),
                color: user.color,
                total_points: aggregate.total_points,
                total_tasks: aggregate.total_tasks,
                avg_points_per_task: average(aggregate.total_points, aggregate.total_tasks),
            }
        })
        .collect();

    Leaderboard {
        member_count: dashboard.user_registry.len(),
        days_tracked: dashboard.chart_series.len(),
        first_day: dashboard.chart_series.first().map(|point| point.day),
        last_day: dashboard.chart_series.last().map(|point| point.day),
        total_points: saturating_sum(rows.iter().map(|row| row.total_points)),
        total_tasks: saturating_sum(rows.iter().map(|row| row.total_tasks)),
        rows,
    }
}

fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

fn average(points: u64, tasks: u64) -> f64 {
    if tasks == 0 {
        0.0
    } else {
        round2(points as f64 / tasks as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
