//! Place search service trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::search::SearchResult;

/// Service for looking up places by free text.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Executes a search with the given query.
    ///
    /// # Arguments
    /// * `query` - Free-text query as typed by the user
    ///
    /// # Returns
    /// The provider's candidates in provider order.
    ///
    /// # Errors
    /// Returns `WayfarerError::Search` on network failure, non-success status
    /// or a malformed payload.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
