//! Get trait for fetching entities and collections.

use async_trait::async_trait;

use crate::error::Result;

/// Fetch what a handle points at.
///
/// Implemented for [`Instance`](crate::Instance) (yields the entity data) and
/// [`Collection`](crate::Collection) (yields the first page of entities).
///
/// # Example
///
/// ```ignore
/// use projectserver::{ProjectClient, Get};
///
/// let client = ProjectClient::from_env()?;
/// let project = client.projects().get_by_id("263fc8d7-...").get().await?;
/// ```
#[async_trait]
pub trait Get {
    /// What the request produces.
    type Output;

    /// Issue the GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn get(&self) -> Result<Self::Output>;
}
