use async_trait::async_trait;
use confab_memory::{
    InMemoryStore, MemoryContent, MemoryError, MemoryRecord, MemoryStore, SearchRequest,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Store that returns canned search results and ignores writes.
#[derive(Clone, Default)]
pub struct StubStore {
    results: Vec<MemoryRecord>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<MemoryRecord>) -> Self {
        Self { results }
    }
}

#[async_trait]
impl MemoryStore for StubStore {
    async fn reset(&self) -> Result<(), MemoryError> {
        Ok(())
    }

    async fn add(
        &self,
        _content: MemoryContent,
        _group_id: &str,
        _metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        Ok(())
    }

    async fn search(&self, _request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        Ok(self.results.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub content: MemoryContent,
    pub group_id: String,
    pub metadata: Map<String, Value>,
}

/// In-memory store that also records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: Arc<InMemoryStore>,
    pub writes: Arc<Mutex<Vec<RecordedWrite>>>,
    pub searches: Arc<Mutex<Vec<SearchRequest>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().len()
    }
}

#[async_trait]
impl MemoryStore for RecordingStore {
    async fn reset(&self) -> Result<(), MemoryError> {
        self.inner.reset().await
    }

    async fn add(
        &self,
        content: MemoryContent,
        group_id: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        self.writes.lock().push(RecordedWrite {
            content: content.clone(),
            group_id: group_id.to_string(),
            metadata: metadata.clone(),
        });
        self.inner.add(content, group_id, metadata).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.searches.lock().push(request.clone());
        self.inner.search(request).await
    }
}

/// Store whose every call fails.
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> MemoryError {
        MemoryError::Api {
            status: 503,
            body: self.message.clone(),
        }
    }
}

#[async_trait]
impl MemoryStore for FailingStore {
    async fn reset(&self) -> Result<(), MemoryError> {
        Err(self.error())
    }

    async fn add(
        &self,
        _content: MemoryContent,
        _group_id: &str,
        _metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        Err(self.error())
    }

    async fn search(&self, _request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        Err(self.error())
    }
}
