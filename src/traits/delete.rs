//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::error::Result;

/// Delete the entity a handle points at.
///
/// Entities whose deletion is processed asynchronously (projects and
/// resource plans) expose an inherent `delete` returning a queue job instead.
#[async_trait]
pub trait Delete {
    /// Issue the delete request.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(&self) -> Result<()>;
}
