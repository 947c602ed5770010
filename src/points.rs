//! Story point extraction from task labels.
//!
//! Boards encode effort as a label such as `"8 POINTS"`. The number must be the
//! first whitespace-separated token of the first label mentioning "POINT";
//! anything else (`"POINTS: 5"`, `" 5 POINTS"`) counts as zero.

use crate::model::Label;

const POINT_MARKER: &str = "POINT";

/// Points for a task, from the first point-like label only.
pub fn extract_points(labels: &[Label]) -> u64 {
    let Some(title) = labels
        .iter()
        .filter_map(|label| label.title.as_deref())
        .find(|title| is_point_label(title))
    else {
        return 0;
    };

    let token = title.split(char::is_whitespace).next().unwrap_or_default();
    match parse_leading_integer(token) {
        Some(points) => points,
        None => {
            tracing::trace!(label = title, "point label has no leading integer");
            0
        }
    }
}

pub fn is_point_label(title: &str) -> bool {
    title.to_uppercase().contains(POINT_MARKER)
}

/// Leading base-10 digits of `token`, accepting an optional `+`.
///
/// Trailing non-digits are ignored (`"5pts"` is 5). Negative or overflowing
/// values are rejected.
fn parse_leading_integer(token: &str) -> Option<u64> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse().ok()
}
