//! Enterprise custom fields, lookup tables and entity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ProjectClient;
use crate::kind;
use crate::odata::quote;
use crate::queryable::{Collection, Instance, Queryable};

/// An enterprise custom field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomField {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub field_type: Option<CustomFieldType>,

    /// Identifier used by external applications.
    #[serde(default)]
    pub app_alternate_id: Option<String>,

    /// Name of the internal column, e.g. `Custom_x005f_...`.
    #[serde(default)]
    pub internal_name: Option<String>,

    #[serde(default)]
    pub is_required: Option<bool>,

    #[serde(default)]
    pub formula: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a custom field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldCreationInformation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Project, task or resource entity type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<CustomFieldType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphical_indicator_non_summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphical_indicator_project_summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphical_indicator_summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editable_in_visibility: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leaf_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiline_text: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_workflow_controlled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_allow_multi_select: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_default_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_table_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tool_tip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_field_for_matching: Option<bool>,
}

impl CustomFieldCreationInformation {
    pub fn new(name: impl Into<String>, field_type: CustomFieldType) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type),
            ..Self::default()
        }
    }
}

int_enum! {
    /// Data type of a custom field.
    pub enum CustomFieldType {
        Date = 4,
        Duration = 6,
        Cost = 9,
        Number = 15,
        Flag = 17,
        Text = 21,
        FinishDate = 27,
    }
}

/// A lookup table constraining the values of text custom fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupTable {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub app_alternate_id: Option<String>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub sort_order: Option<LookupTableSortOrder>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a lookup table.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupTableCreationInformation {
    pub name: String,

    /// Initial entries; sent as a `results` collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<LookupEntryCreationInformation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Code mask, one element per outline level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masks: Option<Vec<LookupMask>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<LookupTableSortOrder>,
}

/// One level of a lookup table's code mask.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupMask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_type: Option<LookupTableMaskSequence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

int_enum! {
    /// Character class of one lookup table mask level.
    pub enum LookupTableMaskSequence {
        NumberText = 0,
        Uppercase = 1,
        Lowercase = 2,
        Characters = 3,
        Date = 4,
        Cost = 5,
        Duration = 6,
        NumberDecimal = 7,
        Flag = 8,
    }
}

int_enum! {
    pub enum LookupTableSortOrder {
        UserDefined = 0,
        Ascending = 1,
        Descending = 2,
    }
}

/// An entry of a lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupEntry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub app_alternate_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Full code including parent levels.
    #[serde(default)]
    pub full_value: Option<String>,

    #[serde(default)]
    pub sort_index: Option<f64>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a lookup table entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntryCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LookupEntryValue>,
}

/// The typed value of a lookup entry. Set the field matching the table type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntryValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_value: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
}

impl LookupEntryValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text_value: Some(value.into()),
            ..Self::default()
        }
    }
}

/// The entity types custom fields can apply to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityTypes {
    /// Properties of the container; usually only metadata and deferred links.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entity type: project, task or resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityType {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Address an entity through its `AppAlternateId` lookup.
fn by_app_alternate_id<K: crate::traits::Kind>(query: &Queryable, object_id: &str) -> Instance<K> {
    Instance::from_query(query.concat(&format!("/GetByAppAlternateId({})", quote(object_id))))
}

impl ProjectClient {
    /// Enterprise custom fields (`CustomFields`).
    pub fn custom_fields(&self) -> Collection<kind::CustomField> {
        Collection::root(self, "CustomFields")
    }

    /// Lookup tables (`LookupTables`).
    pub fn lookup_tables(&self) -> Collection<kind::LookupTable> {
        Collection::root(self, "LookupTables")
    }

    /// The entity types container (`EntityTypes`).
    pub fn entity_types(&self) -> Instance<kind::EntityTypes> {
        Instance::from_query(Queryable::root(self, "EntityTypes"))
    }
}

impl Collection<kind::CustomField> {
    pub fn get_by_app_alternate_id(&self, object_id: &str) -> Instance<kind::CustomField> {
        by_app_alternate_id(self.query(), object_id)
    }
}

impl Instance<kind::CustomField> {
    /// The entity type the field applies to.
    pub fn entity_type(&self) -> Instance<kind::EntityType> {
        self.navigate("EntityType")
    }

    pub fn lookup_entries(&self) -> Collection<kind::LookupEntry> {
        self.collection("LookupEntries")
    }

    pub fn lookup_table(&self) -> Instance<kind::LookupTable> {
        self.navigate("LookupTable")
    }
}

impl Collection<kind::LookupTable> {
    pub fn get_by_app_alternate_id(&self, object_id: &str) -> Instance<kind::LookupTable> {
        by_app_alternate_id(self.query(), object_id)
    }
}

impl Instance<kind::LookupTable> {
    pub fn entries(&self) -> Collection<kind::LookupEntry> {
        self.collection("Entries")
    }
}

impl Collection<kind::LookupEntry> {
    pub fn get_by_app_alternate_id(&self, object_id: &str) -> Instance<kind::LookupEntry> {
        by_app_alternate_id(self.query(), object_id)
    }
}

impl Instance<kind::EntityTypes> {
    pub fn project_entity(&self) -> Instance<kind::EntityType> {
        self.navigate("ProjectEntity")
    }

    pub fn task_entity(&self) -> Instance<kind::EntityType> {
        self.navigate("TaskEntity")
    }

    pub fn resource_entity(&self) -> Instance<kind::EntityType> {
        self.navigate("ResourceEntity")
    }
}
