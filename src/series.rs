//! Cumulative per-user time series.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::flatten::Event;
use crate::model::EntityId;

/// Running totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAggregate {
    pub total_points: u64,
    pub total_tasks: u64,
}

impl UserAggregate {
    /// Totals saturate at `u64::MAX` so they never decrease.
    fn apply(&mut self, event: &Event) {
        self.total_points = self.total_points.saturating_add(event.points);
        self.total_tasks = self.total_tasks.saturating_add(event.task_increment);
    }
}

/// Cumulative totals of every known user as of the end of `day`.
///
/// Serializes flat: `{"day": .., "points_<id>": .., "tasks_<id>": ..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub day: NaiveDate,
    /// Registry order.
    pub totals: Vec<(EntityId, UserAggregate)>,
}

impl TimeSeriesPoint {
    pub fn totals_for(&self, user: &EntityId) -> Option<UserAggregate> {
        self.totals
            .iter()
            .find(|(id, _)| id == user)
            .map(|(_, totals)| *totals)
    }

    pub fn points_for(&self, user: &EntityId) -> Option<u64> {
        self.totals_for(user).map(|totals| totals.total_points)
    }

    pub fn tasks_for(&self, user: &EntityId) -> Option<u64> {
        self.totals_for(user).map(|totals| totals.total_tasks)
    }
}

impl Serialize for TimeSeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.totals.len() * 2))?;
        map.serialize_entry("day", &self.day)?;
        for (id, totals) in &self.totals {
            map.serialize_entry(&format!("points_{id}"), &totals.total_points)?;
            map.serialize_entry(&format!("tasks_{id}"), &totals.total_tasks)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    pub points: Vec<TimeSeriesPoint>,
    pub aggregates: BTreeMap<EntityId, UserAggregate>,
}

/// Fold events in day order into cumulative snapshots.
///
/// Every point carries a value for every user in `users`; users idle so far
/// carry their last total or zero. Events dated the same day share a point.
pub fn build_series(events: &[Event], users: &[EntityId]) -> TimeSeries {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|event| event.day);

    let slots: HashMap<&EntityId, usize> = users
        .iter()
        .enumerate()
        .map(|(slot, id)| (id, slot))
        .collect();
    let mut current = vec![UserAggregate::default(); users.len()];
    let mut points: Vec<TimeSeriesPoint> = Vec::new();

    for event in ordered {
        let Some(&slot) = slots.get(&event.user_id) else {
            tracing::warn!(user = %event.user_id, "event for unregistered user skipped");
            continue;
        };

        let starts_day = points.last().map_or(true, |point| point.day != event.day);
        if starts_day {
            points.push(TimeSeriesPoint {
                day: event.day,
                totals: users.iter().cloned().zip(current.iter().copied()).collect(),
            });
        }

        current[slot].apply(event);
        if let Some(point) = points.last_mut() {
            point.totals[slot].1 = current[slot];
        }
    }

    let aggregates = users.iter().cloned().zip(current).collect();
    TimeSeries { points, aggregates }
}
