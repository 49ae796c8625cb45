//! Task records and their serialized form.
//!
//! A task is a title plus a completion flag, nothing more. The
//! serialized record is the two-field JSON object stored in the tasks
//! file; field names are fixed as `title` and `completed`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

const MARK_DONE: &str = "✓";
const MARK_OPEN: &str = "✗";

/// A titled unit of work with a binary completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Create a new incomplete task.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }

    /// Serialized record form: `{"title": ..., "completed": ...}`.
    pub fn to_record(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "completed": self.completed,
        })
    }

    /// Build a task from a serialized record.
    ///
    /// Both fields must be present and correctly typed; a record that
    /// fails this check fails the whole load rather than producing a
    /// half-formed task.
    pub fn from_record(record: &Value) -> Result<Self> {
        let fields = record
            .as_object()
            .ok_or_else(|| Error::MalformedRecord(format!("expected an object, got {record}")))?;
        let title = fields
            .get("title")
            .and_then(Value::as_str)
            .ok_or_else(|| missing_field("title", "string"))?;
        let completed = fields
            .get("completed")
            .and_then(Value::as_bool)
            .ok_or_else(|| missing_field("completed", "boolean"))?;
        Ok(Self {
            title: title.to_string(),
            completed,
        })
    }

    /// Completion marker used by list renderings. Never persisted.
    pub fn marker(&self) -> &'static str {
        if self.completed {
            MARK_DONE
        } else {
            MARK_OPEN
        }
    }
}

fn missing_field(name: &str, kind: &str) -> Error {
    Error::MalformedRecord(format!("missing or non-{kind} field: {name}"))
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_incomplete() {
        let task = Task::new("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn display_shows_marker_and_title() {
        let mut task = Task::new("Pay rent");
        assert_eq!(task.to_string(), "✗ Pay rent");
        task.completed = true;
        assert_eq!(task.to_string(), "✓ Pay rent");
    }

    #[test]
    fn record_round_trip() {
        let task = Task {
            title: "Water plants".to_string(),
            completed: true,
        };
        let record = task.to_record();
        assert_eq!(record["title"], "Water plants");
        assert_eq!(record["completed"], true);
        let back = Task::from_record(&record).expect("valid record");
        assert_eq!(back, task);
    }

    #[test]
    fn from_record_rejects_missing_title() {
        let record = serde_json::json!({ "completed": false });
        let err = Task::from_record(&record).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn from_record_rejects_wrong_type() {
        let record = serde_json::json!({ "title": "x", "completed": "yes" });
        let err = Task::from_record(&record).unwrap_err();
        assert!(err.to_string().contains("completed"));
    }

    #[test]
    fn from_record_rejects_non_object() {
        let record = serde_json::json!(["title", "completed"]);
        assert!(Task::from_record(&record).is_err());
    }
}
