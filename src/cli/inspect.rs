//! sprintboard color / points command implementations

use crate::color::color_for;
use crate::error::Result;
use crate::model::Label;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::points::{extract_points, is_point_label};

#[derive(serde::Serialize)]
struct ColorReport<'a> {
    handle: &'a str,
    color: String,
}

#[derive(serde::Serialize)]
struct PointsReport<'a> {
    labels: &'a [String],
    matched_label: Option<&'a str>,
    points: u64,
}

pub fn run_color(handle: &str, output: OutputOptions) -> Result<()> {
    let color = color_for(handle);
    let report = ColorReport {
        handle,
        color: color.to_string(),
    };

    let human = HumanOutput::new(format!("{handle}: {color}"));
    emit_success(output, "color", &report, Some(&human))
}

pub fn run_points(labels: &[String], output: OutputOptions) -> Result<()> {
    let parsed: Vec<Label> = labels.iter().map(|title| Label::new(title.as_str())).collect();
    let report = PointsReport {
        labels,
        matched_label: labels
            .iter()
            .map(String::as_str)
            .find(|title| is_point_label(title)),
        points: extract_points(&parsed),
    };

    let mut human = HumanOutput::new(format!("{} points", report.points));
    match report.matched_label {
        Some(label) => human.push_summary("label", label),
        None => human.push_warning("no label mentions POINT"),
    }
    emit_success(output, "points", &report, Some(&human))
}
