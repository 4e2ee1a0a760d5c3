//! File-backed memory store keeping one JSONL file per group.

use crate::error::MemoryError;
use crate::keyword;
use crate::model::{MemoryContent, MemoryRecord};
use crate::store::{MemoryStore, SearchRequest};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File-backed store persisting JSONL records per group.
#[derive(Debug, Clone)]
pub struct FileMemoryStore {
    /// Root directory for memory records.
    root: PathBuf,
}

impl FileMemoryStore {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        info!("initialized file memory store (root={})", root.display());
        Ok(Self { root })
    }

    /// Path to the group JSONL file.
    fn group_path(&self, group_id: &str) -> PathBuf {
        let safe: String = group_id
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.jsonl"))
    }

    /// Load all records for a group.
    fn load_records(&self, group_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        let path = self.group_path(group_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = OpenOptions::new().read(true).open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: MemoryRecord = serde_json::from_str(&line)?;
            records.push(record);
        }
        Ok(records)
    }
}

#[async_trait]
impl MemoryStore for FileMemoryStore {
    /// Delete every group file under the root.
    async fn reset(&self) -> Result<(), MemoryError> {
        let mut removed = 0usize;
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "jsonl") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        info!(
            "reset file memory store (root={}, removed_files={})",
            self.root.display(),
            removed
        );
        Ok(())
    }

    /// Store a record by appending to the group file.
    async fn add(
        &self,
        content: MemoryContent,
        group_id: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        let record = MemoryRecord::new(group_id, content.to_text(), metadata);
        let path = self.group_path(group_id);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{line}")?;
        debug!(
            "stored memory record (group_id={}, content_len={})",
            record.group_id,
            record.memory.len()
        );
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        let records = self.load_records(&request.group_id)?;
        let ranked = keyword::rank(records, request)?;
        debug!(
            "search memory (group_id={}, returned={})",
            request.group_id,
            ranked.len()
        );
        Ok(ranked)
    }
}
