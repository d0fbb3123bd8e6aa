//! Destination suggestions for the search panel.

use std::sync::Arc;

use serde::Serialize;
use wayfarer_core::Coordinates;
use wayfarer_core::search::{PlaceSearch, SearchResult};

/// Label shown in the origin field when it holds the device position.
pub const CURRENT_POSITION_LABEL: &str = "Ma position";

/// Modal alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAlert {
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Search panel use case over a [`PlaceSearch`] provider.
pub struct SuggestionSearch {
    search: Arc<dyn PlaceSearch>,
}

impl SuggestionSearch {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Looks up suggestions for the text typed in the search panel.
    ///
    /// Blank input and the current-position label are answered with no
    /// suggestions without contacting the provider.
    ///
    /// # Errors
    ///
    /// A [`UserAlert`] when the provider fails, whatever the cause.
    pub async fn suggest(&self, query: &str) -> Result<Vec<SearchResult>, UserAlert> {
        let query = query.trim();
        if query.is_empty() || query == CURRENT_POSITION_LABEL {
            return Ok(Vec::new());
        }

        match self.search.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::error!(
                    "[Search] Suggestion lookup failed: {} (code: {:?})",
                    e,
                    e.provider_code()
                );
                Err(UserAlert::new(
                    "Search error",
                    "Unable to find results. Please try again.",
                ))
            }
        }
    }

    /// Destination coordinates for a chosen suggestion.
    pub fn select(&self, suggestion: &SearchResult) -> Coordinates {
        tracing::debug!(
            "[Search] Selected '{}'",
            suggestion.address.freeform_address
        );
        suggestion.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wayfarer_core::search::{SearchAddress, SearchPosition};
    use wayfarer_core::{Result, WayfarerError};

    struct RecordingSearch {
        queries: Mutex<Vec<String>>,
        response: Result<Vec<SearchResult>>,
    }

    impl RecordingSearch {
        fn new(response: Result<Vec<SearchResult>>) -> Arc<Self> {
            Arc::new(Self {
                queries: Mutex::new(Vec::new()),
                response,
            })
        }
    }

    #[async_trait]
    impl PlaceSearch for RecordingSearch {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            self.response.clone()
        }
    }

    fn bellecour() -> SearchResult {
        SearchResult {
            id: "FR/POI/lyon".to_string(),
            address: SearchAddress {
                freeform_address: "Place Bellecour, 69002 Lyon".to_string(),
                country: "France".to_string(),
                country_code: "FR".to_string(),
                municipality: "Lyon".to_string(),
            },
            position: SearchPosition {
                lat: 45.7578,
                lon: 4.832,
            },
        }
    }

    #[tokio::test]
    async fn test_blank_and_label_queries_are_not_sent() {
        let provider = RecordingSearch::new(Ok(vec![bellecour()]));
        let use_case = SuggestionSearch::new(provider.clone());

        assert!(use_case.suggest("   ").await.unwrap().is_empty());
        assert!(use_case.suggest(CURRENT_POSITION_LABEL).await.unwrap().is_empty());
        assert!(provider.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_results_are_returned_and_selectable() {
        let provider = RecordingSearch::new(Ok(vec![bellecour()]));
        let use_case = SuggestionSearch::new(provider.clone());

        let suggestions = use_case.suggest(" Bellecour ").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(*provider.queries.lock().unwrap(), vec!["Bellecour".to_string()]);
        assert_eq!(use_case.select(&suggestions[0]), Coordinates::new(45.7578, 4.832));
    }

    #[tokio::test]
    async fn test_failure_becomes_alert() {
        let provider = RecordingSearch::new(Err(WayfarerError::search_status(
            "Search failed (429): Too Many Requests",
            429,
            Some("TOO_MANY_REQUESTS".to_string()),
        )));
        let use_case = SuggestionSearch::new(provider);

        let alert = use_case.suggest("Lyon").await.unwrap_err();
        assert_eq!(alert.title, "Search error");
        assert_eq!(alert.message, "Unable to find results. Please try again.");
    }
}
