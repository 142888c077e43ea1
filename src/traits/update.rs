//! Update trait for modifying entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// Update an existing entity with a set of properties.
///
/// The properties are merged into the entity server-side; the payload is
/// tagged with the kind's OData entity type.
///
/// # Example
///
/// ```ignore
/// use projectserver::{ProjectClient, Update};
/// use serde_json::json;
///
/// let client = ProjectClient::from_env()?;
/// let sheet = client.timesheet_periods().get_by_id("...").time_sheet();
/// sheet.update(&json!({ "Comments": "Week 12" })).await?;
/// ```
#[async_trait]
pub trait Update {
    /// What the update produces (nothing, or a queue job).
    type Output;

    /// Merge the given properties into the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if `properties` is not a JSON object, the entity is
    /// not found or the request fails.
    async fn update<P>(&self, properties: &P) -> Result<Self::Output>
    where
        P: Serialize + Sync + ?Sized;
}
