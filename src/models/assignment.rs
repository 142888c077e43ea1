//! Assignments and project team resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::kind;
use crate::odata;
use crate::queryable::{Collection, Created, Instance};

/// A resource assigned to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Assignment {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub resource_name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    /// Planned work, e.g. `"16h"`.
    #[serde(default)]
    pub work: Option<String>,

    #[serde(default)]
    pub percent_work_complete: Option<i32>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating an assignment in a draft project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// A resource on a project's team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectResource {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub is_budgeted: Option<bool>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for adding a local resource to a draft project's team.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResourceCreationInformation {
    /// Windows account of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Collection<kind::DraftProjectResource> {
    /// Add an existing enterprise resource to the team.
    ///
    /// The server queues the change; the returned job lives under the
    /// owning project.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn add_enterprise_resource_by_id(
        &self,
        resource_id: &str,
    ) -> Result<Created<kind::QueueJob>> {
        let body = json!({ "resourceId": resource_id });
        let value = self
            .query()
            .child("AddEnterpriseResourceById")
            .post_json(Some(&body))
            .await?;
        let draft: Instance<kind::DraftProject> = Instance::from_query(self.query().parent());
        draft.queue_jobs().created(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assignment_deserialize() {
        let assignment: Assignment = serde_json::from_value(json!({
            "Id": "a1",
            "ResourceName": "Dana",
            "Start": "2018-02-01T08:00:00",
            "Work": "16h",
            "ActualWork": "4h"
        }))
        .unwrap();
        assert_eq!(assignment.resource_name.as_deref(), Some("Dana"));
        assert!(assignment.start.is_some());
        assert_eq!(assignment.extra["ActualWork"], json!("4h"));
    }

    #[test]
    fn test_assignment_creation_serializes() {
        let info = AssignmentCreationInformation {
            resource_id: Some("r1".into()),
            task_id: Some("t1".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({"resourceId": "r1", "taskId": "t1"})
        );
    }
}
