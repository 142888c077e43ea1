//! Projects, their drafts and project-level operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ProjectClient;
use crate::error::Result;
use crate::kind;
use crate::odata::{self, date_literal, quote};
use crate::queryable::{Collection, Created, Instance};
use crate::traits::{Kind, Update};

/// A project, published or draft.
///
/// Both `Projects('id')` and `Projects('id')/Draft` answer with this shape;
/// properties that only one of them carries are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    /// The project GUID.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub created_date: Option<DateTime<Utc>>,

    /// When the project was last published; absent on drafts.
    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub last_published_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub last_saved_date: Option<DateTime<Utc>>,

    /// Whether someone holds the project checked out.
    #[serde(default)]
    pub is_checked_out: bool,

    #[serde(default)]
    pub check_out_description: Option<String>,

    #[serde(default)]
    pub percent_complete: Option<i32>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// The name, or the id when the server sent no name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Parameters for creating a project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreationInformation {
    pub name: String,

    /// Id to create the project with; the server generates one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_project_type_id: Option<String>,
}

impl ProjectCreationInformation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl ProjectClient {
    /// All published projects (`Projects`).
    pub fn projects(&self) -> Collection<kind::PublishedProject> {
        Collection::root(self, "Projects")
    }
}

impl Instance<kind::PublishedProject> {
    /// Check the project out, creating its draft.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn check_out(&self) -> Result<Created<kind::DraftProject>> {
        let data = self.invoke_as("checkOut()", None).await?;
        Ok(Created {
            data,
            instance: self.draft(),
        })
    }

    /// The checked-out copy of this project.
    pub fn draft(&self) -> Instance<kind::DraftProject> {
        self.navigate("Draft")
    }

    pub fn tasks(&self) -> Collection<kind::PublishedTask> {
        self.collection("Tasks")
    }

    pub fn assignments(&self) -> Collection<kind::PublishedAssignment> {
        self.collection("Assignments")
    }

    /// The project team.
    pub fn project_resources(&self) -> Collection<kind::PublishedProjectResource> {
        self.collection("ProjectResources")
    }

    pub fn task_links(&self) -> Collection<kind::PublishedTaskLink> {
        self.collection("TaskLinks")
    }

    /// Jobs queued for this project.
    pub fn queue_jobs(&self) -> Collection<kind::QueueJob> {
        self.collection("QueueJobs")
    }

    pub fn calendar(&self) -> Instance<kind::Calendar> {
        self.navigate("Calendar")
    }

    pub fn enterprise_project_type(&self) -> Instance<kind::EnterpriseProjectType> {
        self.navigate("EnterpriseProjectType")
    }

    /// The workflow phase the project is in.
    pub fn phase(&self) -> Instance<kind::Phase> {
        self.navigate("Phase")
    }

    /// The workflow stage the project is in.
    pub fn stage(&self) -> Instance<kind::Stage> {
        self.navigate("Stage")
    }

    /// The user holding the project checked out.
    pub fn checked_out_by(&self) -> Instance<kind::User> {
        self.navigate("CheckedOutBy")
    }

    pub fn project_summary_task(&self) -> Instance<kind::ProjectSummaryTask> {
        self.navigate("ProjectSummaryTask")
    }

    /// Custom fields that carry values on this project.
    pub fn custom_fields(&self) -> Collection<kind::CustomField> {
        self.collection("CustomFields")
    }

    pub fn resource_plan(&self) -> Instance<kind::ResourcePlan> {
        self.navigate("ResourcePlan")
    }

    /// The resource plan restricted to a date range.
    pub fn resource_plan_by_url(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Instance<kind::ResourcePlan> {
        Instance::from_query(self.query().child(&format!(
            "GetResourcePlanByUrl(start={},end={})",
            date_literal(start),
            date_literal(end)
        )))
    }

    /// Create the SharePoint site of the project.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn create_project_site(&self, name: &str) -> Result<()> {
        self.invoke(&format!("CreateProjectSite(siteName={})", quote(name)), None)
            .await?;
        Ok(())
    }

    /// Delete the project. Deletion runs as a queue job.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn delete(&self) -> Result<Created<kind::QueueJob>> {
        let value = self.query().delete_json().await?;
        self.queue_jobs().created(value)
    }
}

impl Instance<kind::DraftProject> {
    /// Tasks of the draft; new tasks are added here.
    pub fn tasks(&self) -> Collection<kind::DraftTask> {
        self.collection("Tasks")
    }

    pub fn assignments(&self) -> Collection<kind::DraftAssignment> {
        self.collection("Assignments")
    }

    pub fn project_resources(&self) -> Collection<kind::DraftProjectResource> {
        self.collection("ProjectResources")
    }

    pub fn task_links(&self) -> Collection<kind::DraftTaskLink> {
        self.collection("TaskLinks")
    }

    /// Jobs queued for the owning project.
    pub fn queue_jobs(&self) -> Collection<kind::QueueJob> {
        Collection::from_query(self.query().parent().child("QueueJobs"))
    }

    /// The published project this draft belongs to.
    pub fn published(&self) -> Instance<kind::PublishedProject> {
        Instance::from_query(self.query().parent())
    }

    /// Publish the draft, optionally checking it in as well.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn publish(&self, check_in: bool) -> Result<Created<kind::QueueJob>> {
        let value = self.invoke(&format!("publish({check_in})"), None).await?;
        self.queue_jobs().created(value)
    }

    /// Check the draft in without publishing it.
    ///
    /// `force` releases a checkout held by another user.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn check_in(&self, force: bool) -> Result<Created<kind::QueueJob>> {
        let value = self.invoke(&format!("checkIn({force})"), None).await?;
        self.queue_jobs().created(value)
    }
}

#[async_trait]
impl Update for Instance<kind::DraftProject> {
    type Output = Created<kind::QueueJob>;

    #[tracing::instrument(skip(self, properties), fields(path = %self.query().path()))]
    async fn update<P>(&self, properties: &P) -> Result<Created<kind::QueueJob>>
    where
        P: Serialize + Sync + ?Sized,
    {
        let value = self
            .query()
            .merge_json(kind::DraftProject::ENTITY_TYPE, properties)
            .await?;
        self.queue_jobs().created(value)
    }
}
