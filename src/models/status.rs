//! Status reporting: status assignments, their tasks and time phases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::kind;
use crate::odata::{self, date_literal};
use crate::queryable::{Collection, Instance};

/// An assignment as seen by the resource reporting progress on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusAssignment {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub task_name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(default)]
    pub actual_work: Option<String>,

    #[serde(default)]
    pub percent_complete: Option<i32>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for adding a status assignment, optionally on a new task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusAssignmentCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<StatusTaskCreationInformation>,
}

/// A task created together with a status assignment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTaskCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
}

/// The task behind a status assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusTask {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status assignments over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePhase {
    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub end: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection<kind::StatusAssignment> {
    /// The assignments falling between `start` and `end`.
    pub fn get_time_phase(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> Instance<kind::TimePhase> {
        Instance::from_query(self.query().concat(&format!(
            "/GetTimePhaseByUrl({},{})",
            date_literal(start),
            date_literal(end)
        )))
    }

    /// Submit every pending status update of the collection.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn submit_all_status_updates(&self, comment: &str) -> Result<()> {
        let body = json!({ "comment": comment });
        self.query()
            .child("SubmitAllStatusUpdates")
            .post_json(Some(&body))
            .await?;
        Ok(())
    }
}

impl Instance<kind::StatusAssignment> {
    /// Custom field values of the assignment.
    pub fn custom_fields(&self) -> Collection<kind::CustomField> {
        self.collection("CustomFields")
    }

    pub fn project(&self) -> Instance<kind::PublishedProject> {
        self.navigate("Project")
    }

    pub fn resource(&self) -> Instance<kind::EnterpriseResource> {
        self.navigate("Resource")
    }

    pub fn task(&self) -> Instance<kind::StatusTask> {
        self.navigate("Task")
    }

    /// Submit the pending status update of this assignment.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn submit_status_updates(&self, comment: &str) -> Result<()> {
        self.invoke("SubmitStatusUpdates", Some(json!({ "comment": comment })))
            .await?;
        Ok(())
    }
}

impl Instance<kind::TimePhase> {
    pub fn assignments(&self) -> Collection<kind::StatusAssignment> {
        self.collection("Assignments")
    }
}

impl Instance<kind::EnterpriseResource> {
    /// Status assignments of the resource.
    pub fn assignments(&self) -> Collection<kind::StatusAssignment> {
        self.collection("Assignments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectClient;
    use chrono::TimeZone;

    #[test]
    fn test_time_phase_path() {
        let client = ProjectClient::new("https://contoso.sharepoint.com/sites/pwa").unwrap();
        let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2018, 1, 7, 0, 0, 0).unwrap();
        let phase = client
            .enterprise_resources()
            .get_by_id("r1")
            .assignments()
            .get_time_phase(&start, &end);
        assert_eq!(
            phase.assignments().query().path(),
            "_api/ProjectServer/EnterpriseResources('r1')/Assignments/GetTimePhaseByUrl('2018-01-01T00%3A00%3A00.000Z','2018-01-07T00%3A00%3A00.000Z')/Assignments"
        );
    }

    #[test]
    fn test_status_assignment_creation_nests_task() {
        let info = StatusAssignmentCreationInformation {
            project_id: Some("p1".into()),
            task: Some(StatusTaskCreationInformation {
                name: Some("Extra review".into()),
                work: Some("4h".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({"projectId": "p1", "task": {"name": "Extra review", "work": "4h"}})
        );
    }
}
