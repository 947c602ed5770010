//! sprintboard top command implementation

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::flatten::TaskRecord;
use crate::model::EntityId;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::pipeline::{aggregate_text, AggregateOptions};

use super::read_input;

/// Options for the top command
pub struct TopOptions {
    pub input: PathBuf,
    pub user: Option<String>,
    pub limit: Option<usize>,
    pub aggregate: AggregateOptions,
    pub output: OutputOptions,
}

pub fn run(options: TopOptions) -> Result<()> {
    let mut aggregate = options.aggregate;
    if let Some(limit) = options.limit {
        if limit == 0 {
            return Err(Error::InvalidArgument("--limit must be > 0".to_string()));
        }
        aggregate.top_limit = limit;
    }

    let text = read_input(&options.input)?;
    let dashboard = aggregate_text(&text, aggregate)?;

    let selected: Vec<_> = match options.user.as_deref() {
        Some(raw) => {
            let id = EntityId::new(raw.trim());
            let user = dashboard
                .ranked_users
                .iter()
                .find(|user| user.id == id)
                .ok_or_else(|| Error::UserNotFound(raw.to_string()))?;
            vec![user]
        }
        None => dashboard.ranked_users.iter().collect(),
    };

    let mut report: BTreeMap<EntityId, Vec<TaskRecord>> = BTreeMap::new();
    let mut human = HumanOutput::new(format!("sprintboard top (limit {})", aggregate.top_limit));
    human.push_summary("users", selected.len().to_string());

    for user in selected {
        let tasks = dashboard.top_tasks_for(&user.id);
        let totals = dashboard.aggregate_for(&user.id);
        human.push_detail(format!(
            "{} (total {} pts)",
            user.display_name(),
            totals.total_points
        ));
        if tasks.is_empty() {
            human.push_detail("  no tasks");
        }
        for (index, task) in tasks.iter().enumerate() {
            human.push_detail(format!(
                "  {}. [{} pts] {} ({}, {})",
                index + 1,
                task.points,
                task.title,
                task.bucket_title,
                task.day
            ));
        }
        report.insert(user.id.clone(), tasks.to_vec());
    }

    emit_success(options.output, "top", &report, Some(&human))
}
