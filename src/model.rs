//! Input model for sprint bucket documents.
//!
//! Buckets come from hand-edited or exported JSON, so every field besides a
//! user's `id` is optional. Missing or `null` collections read as empty, and
//! scalar fields of the wrong type read as absent.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Identifier for buckets, tasks and users.
///
/// Exports use both numeric and string ids; `1` and `"1"` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(Self(text)),
            RawId::Number(number) => Ok(Self(number_key(&number))),
        }
    }
}

/// Integral floats render without a fraction so `1.0` and `1` collide.
fn number_key(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(value) = number.as_f64() {
            if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
                return format!("{}", value as i64);
            }
        }
    }
    number.to_string()
}

/// A sprint or iteration grouping of tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tasks: Vec<Task>,
}

impl Bucket {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub done: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
    /// Carried for completeness; day bucketing reads `created` only.
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub assignees: Vec<UserRef>,
}

impl Task {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

impl Label {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// A task assignee as it appears in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
}

impl UserRef {
    /// The string colours and display handles derive from: a non-empty
    /// username, else the name.
    pub fn handle(&self) -> &str {
        preferred_handle(self.username.as_deref(), self.name.as_deref())
    }
}

/// A non-empty username, else the name, else `""`.
pub fn preferred_handle<'a>(username: Option<&'a str>, name: Option<&'a str>) -> &'a str {
    match username {
        Some(username) if !username.is_empty() => username,
        _ => name.unwrap_or_default(),
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_share_a_key() {
        let numeric: EntityId = serde_json::from_str("1").expect("numeric id");
        let text: EntityId = serde_json::from_str("\"1\"").expect("string id");
        let float: EntityId = serde_json::from_str("1.0").expect("float id");
        assert_eq!(numeric, text);
        assert_eq!(numeric, float);
        assert_eq!(numeric.as_str(), "1");
    }

    #[test]
    fn missing_and_null_collections_read_empty() {
        let bucket: Bucket =
            serde_json::from_str(r#"{"id": 1, "title": "Sprint"}"#).expect("bucket");
        assert!(bucket.tasks.is_empty());

        let task: Task = serde_json::from_str(r#"{"id": 5, "labels": null, "assignees": null}"#)
            .expect("task");
        assert!(task.labels.is_empty());
        assert!(task.assignees.is_empty());
        assert_eq!(task.title(), "");
    }

    #[test]
    fn wrong_scalar_types_read_absent() {
        let task: Task = serde_json::from_str(
            r#"{"id": 5, "title": 7, "done": "yes", "created": 1696154400000}"#,
        )
        .expect("task");
        assert_eq!(task.title, None);
        assert_eq!(task.done, None);
        assert_eq!(task.created, None);
    }

    #[test]
    fn handle_prefers_non_empty_username() {
        let user: UserRef =
            serde_json::from_str(r#"{"id": 1, "name": "Nguyen Van A", "username": "anv"}"#)
                .expect("user");
        assert_eq!(user.handle(), "anv");

        let blank: UserRef =
            serde_json::from_str(r#"{"id": 1, "name": "Nguyen Van A", "username": ""}"#)
                .expect("user");
        assert_eq!(blank.handle(), "Nguyen Van A");

        let anonymous: UserRef = serde_json::from_str(r#"{"id": 9}"#).expect("user");
        assert_eq!(anonymous.handle(), "");
    }

    #[test]
    fn preferred_handle_falls_back_to_name() {
        assert_eq!(preferred_handle(Some("btt"), Some("Bui Thi T")), "btt");
        assert_eq!(preferred_handle(Some(""), Some("Bui Thi T")), "Bui Thi T");
        assert_eq!(preferred_handle(None, None), "");
    }

    #[test]
    fn user_without_id_is_rejected() {
        let result: std::result::Result<UserRef, _> =
            serde_json::from_str(r#"{"name": "ghost"}"#);
        assert!(result.is_err());
    }
}
