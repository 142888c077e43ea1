//! Enterprise resources, enterprise project types and resource plans.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ProjectClient;
use crate::error::Result;
use crate::kind;
use crate::odata::{self, date_literal};
use crate::queryable::{Collection, Created, Instance};
use crate::traits::{Kind, Update};

use super::ProjectDetailPageCreationInformation;

/// A resource managed centrally by Project Server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnterpriseResource {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub resource_type: Option<EnterpriseResourceType>,

    #[serde(default)]
    pub is_generic: Option<bool>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub is_checked_out: Option<bool>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating an enterprise resource.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseResourceCreationInformation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_budget: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inactive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<EnterpriseResourceType>,
}

int_enum! {
    pub enum EnterpriseResourceType {
        NotSpecified = 0,
        Work = 1,
        Material = 2,
        Cost = 3,
    }
}

/// An enterprise project type (EPT).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnterpriseProjectType {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_default: Option<bool>,

    #[serde(default)]
    pub is_managed: Option<bool>,

    #[serde(default)]
    pub order: Option<i32>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating an enterprise project type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseProjectTypeCreationInformation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_managed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_sync_enable: Option<bool>,

    /// Detail pages shown for projects of this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_detail_pages: Option<Vec<ProjectDetailPageCreationInformation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_plan_template_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_creation_option: Option<i32>,

    #[serde(rename = "siteCreationURL", skip_serializing_if = "Option::is_none")]
    pub site_creation_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_list_sync_enable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_association_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_association_name: Option<String>,

    #[serde(rename = "workspaceTemplateLCID", skip_serializing_if = "Option::is_none")]
    pub workspace_template_lcid: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_template_name: Option<String>,
}

/// The resource plan of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourcePlan {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A resource booking within a resource plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanAssignment {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub booking_type: Option<BookingType>,

    #[serde(default)]
    pub resource_name: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for booking a resource in a resource plan.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAssignmentCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_type: Option<BookingType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<Vec<PlanAssignmentIntervalCreationInformation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

int_enum! {
    /// Whether a booking is firm or tentative.
    pub enum BookingType {
        NotSpecified = 0,
        Committed = 1,
        Proposed = 2,
    }
}

/// Work booked in one time interval of a plan assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanAssignmentInterval {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub end: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One interval of a new plan assignment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAssignmentIntervalCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<DateTime<Utc>>,
}

impl ProjectClient {
    /// Enterprise resources (`EnterpriseResources`).
    pub fn enterprise_resources(&self) -> Collection<kind::EnterpriseResource> {
        Collection::root(self, "EnterpriseResources")
    }

    /// Enterprise project types (`EnterpriseProjectTypes`).
    pub fn enterprise_project_types(&self) -> Collection<kind::EnterpriseProjectType> {
        Collection::root(self, "EnterpriseProjectTypes")
    }
}

impl Instance<kind::EnterpriseResource> {
    /// Check the resource in when it was left checked out.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn force_check_in(&self) -> Result<()> {
        self.invoke("ForceCheckIn", None).await?;
        Ok(())
    }
}

impl Instance<kind::ResourcePlan> {
    pub fn assignments(&self) -> Collection<kind::PlanAssignment> {
        self.collection("Assignments")
    }

    /// Jobs queued for the owning project.
    pub fn queue_jobs(&self) -> Collection<kind::QueueJob> {
        Collection::from_query(self.query().parent().child("QueueJobs"))
    }

    /// Delete the resource plan. Deletion runs as a queue job.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn delete(&self) -> Result<Created<kind::QueueJob>> {
        let value = self.query().delete_json().await?;
        self.queue_jobs().created(value)
    }

    /// Check the plan in when it was left checked out.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn force_check_in(&self) -> Result<Created<kind::QueueJob>> {
        let value = self.invoke("ForceCheckIn", None).await?;
        self.queue_jobs().created(value)
    }

    /// Publish the plan so other users see it.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn publish(&self) -> Result<Created<kind::QueueJob>> {
        let value = self.invoke("Publish", None).await?;
        self.queue_jobs().created(value)
    }
}

#[async_trait]
impl Update for Instance<kind::ResourcePlan> {
    type Output = Created<kind::QueueJob>;

    #[tracing::instrument(skip(self, properties), fields(path = %self.query().path()))]
    async fn update<P>(&self, properties: &P) -> Result<Created<kind::QueueJob>>
    where
        P: Serialize + Sync + ?Sized,
    {
        let value = self
            .query()
            .merge_json(kind::ResourcePlan::ENTITY_TYPE, properties)
            .await?;
        self.queue_jobs().created(value)
    }
}

impl Instance<kind::PlanAssignment> {
    /// Custom field values of the booking.
    pub fn custom_fields(&self) -> Collection<kind::CustomField> {
        self.collection("CustomFields")
    }

    pub fn intervals(&self) -> Collection<kind::PlanAssignmentInterval> {
        self.collection("Intervals")
    }

    /// The booked resource.
    pub fn resource(&self) -> Instance<kind::EnterpriseResource> {
        self.navigate("Resource")
    }
}

impl Collection<kind::PlanAssignmentInterval> {
    /// The interval starting at `start`.
    pub fn get_by_start(&self, start: &DateTime<Utc>) -> Instance<kind::PlanAssignmentInterval> {
        Instance::from_query(
            self.query()
                .concat(&format!("/GetByStart({})", date_literal(start))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odata::wrap_arrays;
    use chrono::TimeZone;
    use serde_json::json;

    fn client() -> ProjectClient {
        ProjectClient::new("https://contoso.sharepoint.com/sites/pwa").unwrap()
    }

    #[test]
    fn test_resource_plan_jobs_live_under_project() {
        let plan = client().projects().get_by_id("p1").resource_plan();
        assert_eq!(
            plan.queue_jobs().get_by_id("j").query().path(),
            "_api/ProjectServer/Projects('p1')/QueueJobs('j')"
        );
    }

    #[test]
    fn test_interval_get_by_start() {
        let start = Utc.with_ymd_and_hms(2018, 5, 1, 0, 0, 0).unwrap();
        let interval = client()
            .projects()
            .get_by_id("p1")
            .resource_plan()
            .assignments()
            .get_by_id("a1")
            .intervals()
            .get_by_start(&start);
        assert_eq!(
            interval.query().path(),
            "_api/ProjectServer/Projects('p1')/ResourcePlan/Assignments('a1')/Intervals/GetByStart('2018-05-01T00%3A00%3A00.000Z')"
        );
    }

    #[test]
    fn test_ept_creation_renames() {
        let info = EnterpriseProjectTypeCreationInformation {
            name: "Agile".into(),
            site_creation_url: Some("https://x".into()),
            workspace_template_lcid: Some(1033),
            department_ids: Some(vec!["d1".into()]),
            ..Default::default()
        };
        let body = wrap_arrays(&serde_json::to_value(&info).unwrap());
        assert_eq!(
            body,
            json!({
                "name": "Agile",
                "siteCreationURL": "https://x",
                "workspaceTemplateLCID": 1033,
                "departmentIds": {"results": ["d1"]}
            })
        );
    }

    #[test]
    fn test_enterprise_resource_type() {
        let resource: EnterpriseResource = serde_json::from_value(json!({
            "Id": "r1",
            "Name": "Crane",
            "ResourceType": 2
        }))
        .unwrap();
        assert_eq!(resource.resource_type, Some(EnterpriseResourceType::Material));
    }
}
