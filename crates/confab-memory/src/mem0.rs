//! Client for the hosted Mem0 memory platform.

use crate::error::MemoryError;
use crate::model::{ChatTurn, MemoryContent, MemoryRecord};
use crate::store::{MemoryStore, SearchRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Default Mem0 platform endpoint.
pub const MEM0_DEFAULT_BASE_URL: &str = "https://api.mem0.ai";

#[derive(Debug, Serialize)]
struct AddBody<'a> {
    messages: Vec<ChatTurn>,
    run_id: &'a str,
    metadata: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    filters: Value,
    top_k: usize,
}

impl<'a> SearchBody<'a> {
    /// v2 search body. The group and metadata predicates are evaluated by the
    /// service before `top_k` applies.
    fn new(request: &'a SearchRequest) -> Self {
        let mut clauses = vec![json!({ "run_id": request.group_id })];
        if !request.filters.is_empty() {
            clauses.push(json!({ "metadata": request.filters }));
        }
        Self {
            query: &request.query,
            filters: json!({ "AND": clauses }),
            top_k: request.limit,
        }
    }
}

/// Memory store backed by the Mem0 REST API.
///
/// Groups map onto Mem0 `run_id`s. The platform has no key-wide wipe, so
/// [`MemoryStore::reset`] deletes the memories of every group registered with
/// [`Mem0Store::with_group`].
#[derive(Debug, Clone)]
pub struct Mem0Store {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    groups: Vec<String>,
}

impl Mem0Store {
    pub fn new(api_key: impl Into<String>) -> Result<Self, MemoryError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: MEM0_DEFAULT_BASE_URL.to_string(),
            groups: Vec::new(),
        })
    }

    /// Point the client at a different deployment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Register a group cleared by `reset`.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        if !self.groups.contains(&group_id) {
            self.groups.push(group_id);
        }
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorization(&self) -> String {
        format!("Token {}", self.api_key)
    }
}

#[async_trait]
impl MemoryStore for Mem0Store {
    async fn reset(&self) -> Result<(), MemoryError> {
        if self.groups.is_empty() {
            warn!("mem0 reset requested with no registered groups");
        }
        for group_id in &self.groups {
            let response = self
                .client
                .delete(self.endpoint("/v1/memories/"))
                .header(reqwest::header::AUTHORIZATION, self.authorization())
                .query(&[("run_id", group_id.as_str())])
                .send()
                .await?;
            ensure_success(response).await?;
            info!("reset mem0 memories (run_id={group_id})");
        }
        Ok(())
    }

    async fn add(
        &self,
        content: MemoryContent,
        group_id: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        let body = AddBody {
            messages: content.to_turns(),
            run_id: group_id,
            metadata: &metadata,
        };
        let response = self
            .client
            .post(self.endpoint("/v1/memories/"))
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;
        debug!(
            "stored mem0 memory (run_id={}, turns={})",
            group_id,
            body.messages.len()
        );
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<MemoryRecord>, MemoryError> {
        let body = SearchBody::new(request);
        let response = self
            .client
            .post(self.endpoint("/v2/memories/search/"))
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .json(&body)
            .send()
            .await?;
        let value: Value = ensure_success(response).await?.json().await?;
        let records = parse_search_response(value, request)?;
        debug!(
            "search mem0 memory (run_id={}, returned={})",
            request.group_id,
            records.len()
        );
        Ok(records)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, MemoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(MemoryError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Decode a search response, accepting a bare array or a `results` envelope.
///
/// Filters are re-applied locally and results are re-sorted by score so the
/// store contract holds whatever the service returns.
pub(crate) fn parse_search_response(
    value: Value,
    request: &SearchRequest,
) -> Result<Vec<MemoryRecord>, MemoryError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(MemoryError::Malformed(
                    "search response has no results array".to_string(),
                ));
            }
        },
        other => {
            return Err(MemoryError::Malformed(format!(
                "unexpected search response: {other}"
            )));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let record = parse_item(item, &request.group_id)?;
        if request.matches(&record) {
            records.push(record);
        }
    }
    records.sort_by(|left, right| {
        right
            .score
            .unwrap_or(0.0)
            .total_cmp(&left.score.unwrap_or(0.0))
    });
    records.truncate(request.limit);
    Ok(records)
}

fn parse_item(item: Value, group_id: &str) -> Result<MemoryRecord, MemoryError> {
    let Value::Object(mut item) = item else {
        return Err(MemoryError::Malformed(format!(
            "search result is not an object: {item}"
        )));
    };
    let memory = match item.remove("memory") {
        Some(Value::String(memory)) => memory,
        _ => {
            return Err(MemoryError::Malformed(
                "search result has no memory text".to_string(),
            ));
        }
    };
    let metadata = match item.remove("metadata") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(metadata)) => metadata,
        Some(other) => {
            return Err(MemoryError::Malformed(format!(
                "search result metadata is not an object: {other}"
            )));
        }
    };
    let score = item.get("score").and_then(Value::as_f64).map(|s| s as f32);
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4);
    let created_at = item
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    let group_id = item
        .get("run_id")
        .and_then(Value::as_str)
        .unwrap_or(group_id)
        .to_string();

    Ok(MemoryRecord {
        id,
        group_id,
        memory,
        metadata,
        score,
        created_at,
    })
}
