//! Top-task lists and user ranking.

use std::collections::BTreeMap;

use crate::flatten::{RegisteredUser, TaskRecord, UserRegistry};
use crate::model::EntityId;
use crate::series::UserAggregate;

pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Highest-point tasks first, at most `limit`. Ties keep input order.
pub fn top_tasks(records: &[TaskRecord], limit: usize) -> Vec<TaskRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.points.cmp(&a.points));
    ranked.truncate(limit);
    ranked
}

pub fn top_tasks_by_user(
    registry: &UserRegistry,
    limit: usize,
) -> BTreeMap<EntityId, Vec<TaskRecord>> {
    registry
        .iter_records()
        .map(|(user, records)| (user.id.clone(), top_tasks(records, limit)))
        .collect()
}

/// Users by total points, highest first. Ties keep registry order; users
/// without an aggregate rank as zero.
pub fn rank_users(
    users: &[RegisteredUser],
    aggregates: &BTreeMap<EntityId, UserAggregate>,
) -> Vec<RegisteredUser> {
    let total = |user: &RegisteredUser| {
        aggregates
            .get(&user.id)
            .map_or(0, |aggregate| aggregate.total_points)
    };

    let mut ranked = users.to_vec();
    ranked.sort_by(|a, b| total(b).cmp(&total(a)));
    ranked
}
