//! List trait for walking paged collections.

use async_trait::async_trait;

use crate::error::Result;
use crate::pagination::Page;

/// Maximum pages to follow (safety limit).
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Page through a collection by following server-provided next links.
///
/// # Example
///
/// ```ignore
/// use projectserver::{ProjectClient, List};
///
/// let client = ProjectClient::from_env()?;
///
/// // Fetch a single page
/// let page = client.projects().top(50).get_page().await?;
///
/// // Fetch all pages
/// let all_projects = client.projects().get_all().await?;
/// ```
#[async_trait]
pub trait List: Sync {
    /// The item type.
    type Item: Send;

    /// Fetch the first page, honouring the handle's query options.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn get_page(&self) -> Result<Page<Self::Item>>;

    /// Fetch the page behind a next link returned by a previous page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn next_page(&self, next_link: &str) -> Result<Page<Self::Item>>;

    /// Fetch every page.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn get_all(&self) -> Result<Vec<Self::Item>> {
        let mut page = self.get_page().await?;
        let mut all_items = Vec::new();
        let mut fetched = 1;

        loop {
            let next = page.next_link.take();
            all_items.extend(page.items);

            let Some(link) = next else {
                break;
            };

            // Safety limit to prevent infinite loops
            if fetched >= DEFAULT_MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    DEFAULT_MAX_PAGES
                );
                break;
            }

            page = self.next_page(&link).await?;
            fetched += 1;
        }

        Ok(all_items)
    }
}
