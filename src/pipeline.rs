//! End-to-end aggregation of a bucket document into a dashboard bundle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::flatten::{flatten, RegisteredUser, TaskRecord};
use crate::model::{Bucket, EntityId};
use crate::rank::{rank_users, top_tasks_by_user, DEFAULT_TOP_LIMIT};
use crate::series::{build_series, TimeSeriesPoint, UserAggregate};

const SHAPE_MESSAGE: &str = "input must be a JSON array of bucket objects";

/// Knobs for one aggregation run.
#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Stands in for tasks without a usable `created` timestamp.
    pub now: DateTime<Utc>,
    pub top_limit: usize,
}

impl AggregateOptions {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Everything a renderer needs, recomputed from scratch per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub chart_series: Vec<TimeSeriesPoint>,
    pub user_registry: Vec<RegisteredUser>,
    pub user_aggregates: BTreeMap<EntityId, UserAggregate>,
    pub top_tasks_by_user: BTreeMap<EntityId, Vec<TaskRecord>>,
    pub ranked_users: Vec<RegisteredUser>,
}

impl Dashboard {
    pub fn aggregate_for(&self, user: &EntityId) -> UserAggregate {
        self.user_aggregates.get(user).copied().unwrap_or_default()
    }

    pub fn top_tasks_for(&self, user: &EntityId) -> &[TaskRecord] {
        self.top_tasks_by_user
            .get(user)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Parse a bucket document.
///
/// Unparsable text is [`Error::MalformedJson`]; valid JSON of the wrong shape
/// is [`Error::InvalidInputShape`].
pub fn parse_buckets(text: &str) -> Result<Vec<Bucket>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| Error::MalformedJson(err.to_string()))?;

    if !value.is_array() {
        return Err(Error::InvalidInputShape(SHAPE_MESSAGE.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|err| Error::InvalidInputShape(format!("{SHAPE_MESSAGE}: {err}")))
}

pub fn aggregate(buckets: &[Bucket], options: AggregateOptions) -> Dashboard {
    let flattened = flatten(buckets, options.now);
    let registry = flattened.registry;

    let user_ids: Vec<EntityId> = registry.users().iter().map(|user| user.id.clone()).collect();
    let series = build_series(&flattened.events, &user_ids);
    let top_tasks_by_user = top_tasks_by_user(&registry, options.top_limit);
    let ranked_users = rank_users(registry.users(), &series.aggregates);

    tracing::debug!(
        buckets = buckets.len(),
        events = flattened.events.len(),
        users = registry.len(),
        days = series.points.len(),
        "aggregated dashboard"
    );

    Dashboard {
        chart_series: series.points,
        user_registry: registry.users().to_vec(),
        user_aggregates: series.aggregates,
        top_tasks_by_user,
        ranked_users,
    }
}

/// Parse and aggregate in one step.
pub fn aggregate_text(text: &str, options: AggregateOptions) -> Result<Dashboard> {
    let buckets = parse_buckets(text)?;
    Ok(aggregate(&buckets, options))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The dashboard was recomputed from the new text.
    Updated,
    /// The text was not JSON; the previous dashboard stands.
    Retained,
}

/// Holds the last good dashboard across edits of an input buffer.
///
/// Half-typed JSON is ignored. A document of the wrong shape is reported but
/// leaves the previous dashboard in place.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    current: Dashboard,
    top_limit: Option<usize>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_limit(top_limit: usize) -> Self {
        Self {
            current: Dashboard::default(),
            top_limit: Some(top_limit),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.current
    }

    pub fn update(&mut self, text: &str) -> Result<UpdateOutcome> {
        self.update_at(text, Utc::now())
    }

    pub fn update_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<UpdateOutcome> {
        let buckets = match parse_buckets(text) {
            Ok(buckets) => buckets,
            Err(Error::MalformedJson(reason)) => {
                tracing::debug!(%reason, "input is not JSON yet, keeping previous dashboard");
                return Ok(UpdateOutcome::Retained);
            }
            Err(err) => return Err(err),
        };

        let options = AggregateOptions {
            now,
            top_limit: self.top_limit.unwrap_or(DEFAULT_TOP_LIMIT),
        };
        self.current = aggregate(&buckets, options);
        Ok(UpdateOutcome::Updated)
    }
}
