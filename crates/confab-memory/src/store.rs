//! Memory store abstraction consumed by the chat runtime.

use crate::error::MemoryError;
use crate::model::{MemoryContent, MemoryRecord};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Result cap applied when a search does not set one.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Ranked search against one group.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Free-form query text.
    pub query: String,
    /// Group to search in.
    pub group_id: String,
    /// Exact-match predicates on metadata fields.
    pub filters: Map<String, Value>,
    /// Maximum number of results.
    pub limit: usize,
}

impl SearchRequest {
    /// Unfiltered search with the default limit.
    pub fn new(query: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            group_id: group_id.into(),
            filters: Map::new(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Require a metadata field to equal `value`.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether a record belongs to the group and passes every filter.
    pub fn matches(&self, record: &MemoryRecord) -> bool {
        record.group_id == self.group_id
            && self
                .filters
                .iter()
                .all(|(key, expected)| record.metadata.get(key) == Some(expected))
    }
}

#[async_trait]
/// Memory store used by the message processor and inspector.
pub trait MemoryStore: Send + Sync {
    /// Remove every memory the store owns.
    async fn reset(&self) -> Result<(), MemoryError>;

    /// Record content under a group with the given metadata.
    async fn add(
        &self,
        content: MemoryContent,
        group_id: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError>;

    /// Return records ranked by non-increasing score.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SEARCH_LIMIT, SearchRequest};
    use crate::model::{MemoryRecord, participant_metadata};

    #[test]
    fn request_defaults_to_unfiltered() {
        let request = SearchRequest::new("plans", "group");
        assert!(request.filters.is_empty());
        assert_eq!(request.limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn matches_checks_group_and_filters() {
        let record = MemoryRecord::new("group", "likes tabla", participant_metadata("bheem"));
        let request = SearchRequest::new("tabla", "group").with_filter("participant", "bheem");
        assert!(request.matches(&record));

        let other_participant =
            SearchRequest::new("tabla", "group").with_filter("participant", "arjun");
        assert!(!other_participant.matches(&record));

        let other_group = SearchRequest::new("tabla", "elsewhere");
        assert!(!other_group.matches(&record));
    }
}
