//! Tasks and task links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind;
use crate::odata;
use crate::queryable::Instance;

/// A task of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    /// Duration as the server renders it, e.g. `"5d"`.
    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub percent_complete: Option<i32>,

    /// Whether the task is scheduled manually.
    #[serde(default)]
    pub is_manual: Option<bool>,

    #[serde(default)]
    pub outline_level: Option<i32>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a task in a draft project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreationInformation {
    pub name: String,

    /// Insert the new task after this task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_after_id: Option<String>,

    /// Duration, e.g. `"3d"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_manual: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Make the new task a subtask of this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
}

impl TaskCreationInformation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

int_enum! {
    /// How the dates of two linked tasks depend on each other.
    pub enum DependencyType {
        FinishFinish = 0,
        FinishStart = 1,
        StartFinish = 2,
        StartStart = 3,
    }
}

/// A dependency link between two tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskLink {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub dependency_type: Option<DependencyType>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a task link in a draft project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLinkCreationInformation {
    /// The predecessor task.
    pub start_id: String,

    /// The successor task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<DependencyType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Instance<kind::PublishedTaskLink> {
    /// The predecessor task.
    pub fn start(&self) -> Instance<kind::PublishedTask> {
        self.navigate("Start")
    }

    /// The successor task.
    pub fn end(&self) -> Instance<kind::PublishedTask> {
        self.navigate("End")
    }
}

impl Instance<kind::DraftTaskLink> {
    /// The predecessor task.
    pub fn start(&self) -> Instance<kind::DraftTask> {
        self.navigate("Start")
    }

    /// The successor task.
    pub fn end(&self) -> Instance<kind::DraftTask> {
        self.navigate("End")
    }
}
