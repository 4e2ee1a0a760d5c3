//! Memory record model shared by stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Metadata key carrying the participant tag.
pub const PARTICIPANT_KEY: &str = "participant";

/// Persisted memory record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Group the record belongs to.
    pub group_id: String,
    /// Remembered text.
    pub memory: String,
    /// Additional metadata for filtering.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Relevance score, only present on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl MemoryRecord {
    /// Build a new unscored record stamped with the current time.
    pub fn new(
        group_id: impl Into<String>,
        memory: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: group_id.into(),
            memory: memory.into(),
            metadata,
            score: None,
            created_at: Utc::now(),
        }
    }

    /// Participant tag, if the metadata carries one as a string.
    pub fn participant(&self) -> Option<&str> {
        self.metadata.get(PARTICIPANT_KEY).and_then(Value::as_str)
    }
}

/// One role-tagged turn of an exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Content accepted by a memory write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryContent {
    /// A plain text span.
    Text(String),
    /// A short ordered list of role-tagged turns.
    Messages(Vec<ChatTurn>),
}

impl MemoryContent {
    /// Flatten the content into the text a local store keeps.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Messages(turns) => turns
                .iter()
                .map(|turn| format!("{}: {}", turn.role, turn.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Express the content as turns, wrapping plain text as a user turn.
    pub fn to_turns(&self) -> Vec<ChatTurn> {
        match self {
            Self::Text(text) => vec![ChatTurn::user(text.clone())],
            Self::Messages(turns) => turns.clone(),
        }
    }
}

impl From<&str> for MemoryContent {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MemoryContent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<ChatTurn>> for MemoryContent {
    fn from(value: Vec<ChatTurn>) -> Self {
        Self::Messages(value)
    }
}

/// Build a metadata map tagging a single participant.
pub fn participant_metadata(participant: &str) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        PARTICIPANT_KEY.to_string(),
        Value::String(participant.to_string()),
    );
    metadata
}

#[cfg(test)]
mod tests {
    use super::{ChatTurn, MemoryContent, MemoryRecord, participant_metadata};
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_flatten_to_role_lines() {
        let content = MemoryContent::Messages(vec![
            ChatTurn::user("I'm vegetarian"),
            ChatTurn::assistant("Noted!"),
        ]);
        assert_eq!(content.to_text(), "user: I'm vegetarian\nassistant: Noted!");
    }

    #[test]
    fn text_becomes_single_user_turn() {
        let content = MemoryContent::from("hello");
        assert_eq!(content.to_turns(), vec![ChatTurn::user("hello")]);
    }

    #[test]
    fn participant_reads_string_tag_only() {
        let record = MemoryRecord::new("g", "x", participant_metadata("archie"));
        assert_eq!(record.participant(), Some("archie"));

        let mut metadata = serde_json::Map::new();
        metadata.insert("participant".to_string(), serde_json::json!(7));
        let record = MemoryRecord::new("g", "x", metadata);
        assert_eq!(record.participant(), None);
    }
}
