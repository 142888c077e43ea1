//! SharePoint users referenced by projects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A SharePoint site user, e.g. the one holding a project checked out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub login_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
