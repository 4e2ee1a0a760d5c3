//! Typed view over memory search results and context formatting.

use crate::error::ConfabCoreError;
use confab_memory::MemoryRecord;

/// A search hit attributed to one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedMemory {
    /// Participant key from the record metadata.
    pub participant: String,
    /// Remembered text.
    pub memory: String,
    /// Relevance score as reported by the store.
    pub score: Option<f32>,
}

impl TaggedMemory {
    /// Score used for ordering; a missing score ranks lowest.
    pub fn rank(&self) -> f32 {
        self.score.unwrap_or(0.0)
    }
}

impl TryFrom<MemoryRecord> for TaggedMemory {
    type Error = ConfabCoreError;

    fn try_from(record: MemoryRecord) -> Result<Self, Self::Error> {
        let Some(participant) = record.participant().map(str::to_string) else {
            return Err(ConfabCoreError::MalformedRecord(format!(
                "record {} has no participant tag",
                record.id
            )));
        };
        Ok(Self {
            participant,
            memory: record.memory,
            score: record.score,
        })
    }
}

/// Convert raw records, failing on the first one without a participant tag.
pub(crate) fn tag_records(
    records: Vec<MemoryRecord>,
) -> Result<Vec<TaggedMemory>, ConfabCoreError> {
    records.into_iter().map(TaggedMemory::try_from).collect()
}

/// Stable sort by descending score.
pub(crate) fn sort_by_score(memories: &mut [TaggedMemory]) {
    memories.sort_by(|left, right| right.rank().total_cmp(&left.rank()));
}

/// Format memories for prompt injection; empty when there are none.
pub fn format_memory_context(memories: &[TaggedMemory]) -> String {
    if memories.is_empty() {
        return String::new();
    }
    let lines = memories
        .iter()
        .map(|m| format!("- {} (from: {})", m.memory, m.participant))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Previous memories from the conversation:\n{lines}")
}

#[cfg(test)]
mod tests {
    use super::{TaggedMemory, format_memory_context, sort_by_score, tag_records};
    use crate::error::ConfabCoreError;
    use confab_memory::{MemoryRecord, participant_metadata};
    use pretty_assertions::assert_eq;

    fn tagged(participant: &str, memory: &str, score: Option<f32>) -> TaggedMemory {
        TaggedMemory {
            participant: participant.to_string(),
            memory: memory.to_string(),
            score,
        }
    }

    #[test]
    fn empty_context_is_empty_string() {
        assert_eq!(format_memory_context(&[]), "");
    }

    #[test]
    fn context_lists_each_memory_with_origin() {
        let context = format_memory_context(&[
            tagged("bheem", "Is vegetarian", Some(0.8)),
            tagged("arjun", "Brings biryani", None),
        ]);
        assert_eq!(
            context,
            "Previous memories from the conversation:\n\
             - Is vegetarian (from: bheem)\n\
             - Brings biryani (from: arjun)"
        );
    }

    #[test]
    fn missing_score_sorts_last() {
        let mut memories = vec![
            tagged("a", "none", None),
            tagged("b", "high", Some(0.9)),
            tagged("c", "low", Some(0.1)),
        ];
        sort_by_score(&mut memories);
        let order: Vec<_> = memories.iter().map(|m| m.memory.as_str()).collect();
        assert_eq!(order, vec!["high", "low", "none"]);
    }

    #[test]
    fn untagged_record_is_malformed() {
        let good = MemoryRecord::new("g", "ok", participant_metadata("archie"));
        let bad = MemoryRecord::new("g", "orphan", serde_json::Map::new());
        let err = tag_records(vec![good, bad]).unwrap_err();
        assert!(matches!(err, ConfabCoreError::MalformedRecord(_)));
    }
}
