//! Flattening of buckets into per-assignee events and task records.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::color::{color_for, Color};
use crate::day::normalize_day;
use crate::model::{preferred_handle, Bucket, EntityId, UserRef};
use crate::points::extract_points;

/// One (task, assignee) contribution to the cumulative series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub day: NaiveDate,
    pub user_id: EntityId,
    pub points: u64,
    pub task_increment: u64,
}

/// A task as attributed to one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_id: Option<EntityId>,
    pub title: String,
    pub points: u64,
    pub day: NaiveDate,
    pub bucket_title: String,
}

/// A user as first seen in the input, with a derived colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub id: EntityId,
    pub name: Option<String>,
    pub username: Option<String>,
    pub color: Color,
}

impl RegisteredUser {
    fn from_ref(user: &UserRef) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            color: color_for(user.handle()),
        }
    }

    /// Username when present, else name.
    pub fn display_name(&self) -> &str {
        preferred_handle(self.username.as_deref(), self.name.as_deref())
    }
}

/// Users in first-seen order with their task records.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: Vec<RegisteredUser>,
    records: Vec<Vec<TaskRecord>>,
    index: HashMap<EntityId, usize>,
}

impl UserRegistry {
    /// Slot for `user`, registering it on first sight. Later sightings never
    /// overwrite the first name, username or colour.
    fn slot(&mut self, user: &UserRef) -> usize {
        if let Some(&slot) = self.index.get(&user.id) {
            return slot;
        }
        let slot = self.users.len();
        self.users.push(RegisteredUser::from_ref(user));
        self.records.push(Vec::new());
        self.index.insert(user.id.clone(), slot);
        slot
    }

    pub fn users(&self) -> &[RegisteredUser] {
        &self.users
    }

    pub fn get(&self, id: &EntityId) -> Option<&RegisteredUser> {
        self.index.get(id).map(|&slot| &self.users[slot])
    }

    pub fn records(&self, id: &EntityId) -> Option<&[TaskRecord]> {
        self.index.get(id).map(|&slot| self.records[slot].as_slice())
    }

    /// (user, records) pairs in registry order.
    pub fn iter_records(&self) -> impl Iterator<Item = (&RegisteredUser, &[TaskRecord])> {
        self.users
            .iter()
            .zip(self.records.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub events: Vec<Event>,
    pub registry: UserRegistry,
}

/// Walk buckets, tasks and assignees in input order.
///
/// Completed and open tasks are treated alike. Tasks without assignees
/// contribute nothing.
pub fn flatten(buckets: &[Bucket], now: DateTime<Utc>) -> Flattened {
    let mut flattened = Flattened::default();

    for bucket in buckets {
        for task in &bucket.tasks {
            if task.assignees.is_empty() {
                continue;
            }

            let points = extract_points(&task.labels);
            let day = normalize_day(task.created.as_deref(), now);

            for assignee in &task.assignees {
                let slot = flattened.registry.slot(assignee);

                flattened.events.push(Event {
                    day,
                    user_id: assignee.id.clone(),
                    points,
                    task_increment: 1,
                });

                flattened.registry.records[slot].push(TaskRecord {
                    task_id: task.id.clone(),
                    title: task.title().to_string(),
                    points,
                    day,
                    bucket_title: bucket.title().to_string(),
                });
            }
        }
    }

    flattened
}
