//! Add trait for creating entities in a collection.

use async_trait::async_trait;

use crate::error::Result;

/// Create a new entity in a collection.
///
/// # Example
///
/// ```ignore
/// use projectserver::{Add, ProjectClient, CalendarCreationInformation};
///
/// let client = ProjectClient::from_env()?;
/// let created = client
///     .calendars()
///     .add(&CalendarCreationInformation {
///         name: Some("Night shift".to_string()),
///         ..Default::default()
///     })
///     .await?;
/// println!("created {}", created.data.id);
/// ```
#[async_trait]
pub trait Add {
    /// The creation-information payload.
    type Params: Sync + ?Sized;

    /// What the server answers with.
    type Output;

    /// Post the creation information to the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response lacks an `Id`.
    async fn add(&self, params: &Self::Params) -> Result<Self::Output>;
}
