//! Workflow phases, stages and project detail pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ProjectClient;
use crate::kind;
use crate::queryable::{Collection, Instance};

/// A workflow phase grouping stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Phase {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCreationInformation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stage {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub behavior: Option<StrategicImpactBehavior>,

    #[serde(default)]
    pub check_in_required: Option<bool>,

    #[serde(default)]
    pub submit_description: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a stage.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCreationInformation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<StrategicImpactBehavior>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<StageCustomFieldCreationInformation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_detail_pages: Option<Vec<StageDetailPageCreationInformation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_status_page_id: Option<String>,
}

int_enum! {
    /// How the strategic impact of a project is treated in a stage.
    pub enum StrategicImpactBehavior {
        NotSpecified = 0,
        ReadOnly = 1,
        ReadWrite = 2,
        Required = 3,
    }
}

/// A custom field shown in a workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StageCustomField {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub read_only: Option<bool>,

    #[serde(default)]
    pub required: Option<bool>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCustomFieldCreationInformation {
    /// Id of the custom field to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A project detail page as attached to a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StageDetailPage {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub position: Option<i32>,

    #[serde(default)]
    pub requires_attention: Option<bool>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDetailPageCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Id of the project detail page to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_attention: Option<bool>,
}

/// A project detail page (PDP).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDetailPage {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Page category (create, workflow status or detail).
    #[serde(default)]
    pub page_type: Option<i32>,

    #[serde(default)]
    pub item: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A detail page reference inside an enterprise project type.
///
/// Unlike the other creation payloads the server expects these properties
/// in PascalCase.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDetailPageCreationInformation {
    pub id: String,

    /// Show the page when a project is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_create: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl ProjectClient {
    /// Workflow phases (`Phases`).
    pub fn phases(&self) -> Collection<kind::Phase> {
        Collection::root(self, "Phases")
    }

    /// Workflow stages (`Stages`).
    pub fn stages(&self) -> Collection<kind::Stage> {
        Collection::root(self, "Stages")
    }

    /// Project detail pages (`ProjectDetailPages`).
    pub fn project_detail_pages(&self) -> Collection<kind::ProjectDetailPage> {
        Collection::root(self, "ProjectDetailPages")
    }
}

impl Instance<kind::Stage> {
    pub fn custom_fields(&self) -> Collection<kind::StageCustomField> {
        self.collection("CustomFields")
    }

    /// The phase the stage belongs to.
    pub fn phase(&self) -> Instance<kind::Phase> {
        self.navigate("Phase")
    }

    pub fn project_detail_pages(&self) -> Collection<kind::StageDetailPage> {
        self.collection("ProjectDetailPages")
    }

    /// The page showing the workflow status of the stage.
    pub fn workflow_status_page(&self) -> Instance<kind::ProjectDetailPage> {
        self.navigate("WorkflowStatusPage")
    }
}

impl Instance<kind::StageCustomField> {
    pub fn stage(&self) -> Instance<kind::Stage> {
        self.navigate("Stage")
    }
}

impl Instance<kind::StageDetailPage> {
    /// The underlying project detail page.
    pub fn page(&self) -> Instance<kind::ProjectDetailPage> {
        self.navigate("Page")
    }

    pub fn stage(&self) -> Instance<kind::Stage> {
        self.navigate("Stage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odata::wrap_arrays;
    use serde_json::json;

    #[test]
    fn test_stage_creation_payload() {
        let info = StageCreationInformation {
            name: "Create".into(),
            behavior: Some(StrategicImpactBehavior::ReadWrite),
            custom_fields: Some(vec![StageCustomFieldCreationInformation {
                id: Some("cf1".into()),
                required: Some(true),
                read_only: None,
            }]),
            ..Default::default()
        };
        assert_eq!(
            wrap_arrays(&serde_json::to_value(&info).unwrap()),
            json!({
                "name": "Create",
                "behavior": 2,
                "customFields": {"results": [{"id": "cf1", "required": true}]}
            })
        );
    }

    #[test]
    fn test_detail_page_reference_is_pascal_case() {
        let page = ProjectDetailPageCreationInformation {
            id: "pdp".into(),
            is_create: Some(true),
            position: None,
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"Id": "pdp", "IsCreate": true})
        );
    }

    #[test]
    fn test_stage_navigation() {
        let client = ProjectClient::new("https://contoso.sharepoint.com/sites/pwa").unwrap();
        let stage = client.stages().get_by_id("s1");
        assert_eq!(
            stage
                .project_detail_pages()
                .get_by_id("d1")
                .page()
                .query()
                .path(),
            "_api/ProjectServer/Stages('s1')/ProjectDetailPages('d1')/Page"
        );
        assert_eq!(
            stage.workflow_status_page().query().path(),
            "_api/ProjectServer/Stages('s1')/WorkflowStatusPage"
        );
    }
}
