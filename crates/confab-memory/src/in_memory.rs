//! Process-local memory store with keyword ranking.

use crate::error::MemoryError;
use crate::keyword;
use crate::model::{MemoryContent, MemoryRecord};
use crate::store::{MemoryStore, SearchRequest};
use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use serde_json::{Map, Value};

/// Memory store that keeps records in memory for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<MemoryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Snapshot of every record in insertion order.
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.records.read().clone()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn reset(&self) -> Result<(), MemoryError> {
        let mut records = self.records.write();
        debug!("reset in-memory store (dropped={})", records.len());
        records.clear();
        Ok(())
    }

    async fn add(
        &self,
        content: MemoryContent,
        group_id: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        let record = MemoryRecord::new(group_id, content.to_text(), metadata);
        debug!(
            "stored memory record (group_id={}, content_len={})",
            record.group_id,
            record.memory.len()
        );
        self.records.write().push(record);
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        let snapshot = self.records.read().clone();
        let ranked = keyword::rank(snapshot, request)?;
        debug!(
            "search memory (group_id={}, returned={})",
            request.group_id,
            ranked.len()
        );
        Ok(ranked)
    }
}
