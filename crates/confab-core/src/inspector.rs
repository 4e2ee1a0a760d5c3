//! Memory reporting over a group chat's store.

use crate::chat::{GroupChat, TaggedMemory, sort_by_score};
use crate::display::{format_score, print_separator};
use crate::error::ConfabCoreError;
use confab_memory::{PARTICIPANT_KEY, SearchRequest};
use log::debug;
use std::io::Write;

/// Broad query used to list every memory in a group.
pub const CATCH_ALL_QUERY: &str = "all memories";

/// Reads back what the store remembers about a group.
pub struct MemoryInspector<'a> {
    chat: &'a GroupChat,
}

impl<'a> MemoryInspector<'a> {
    pub fn new(chat: &'a GroupChat) -> Self {
        Self { chat }
    }

    /// Every memory in the group, optionally restricted to one participant,
    /// ordered by descending score.
    pub async fn memories(
        &self,
        participant: Option<&str>,
    ) -> Result<Vec<TaggedMemory>, ConfabCoreError> {
        if let Some(key) = participant {
            self.chat.roster().get(key)?;
        }
        let request = SearchRequest::new(CATCH_ALL_QUERY, self.chat.group_id());
        let mut memories = self.chat.search(&request).await?;
        if let Some(key) = participant {
            memories.retain(|memory| memory.participant == key);
        }
        sort_by_score(&mut memories);
        debug!(
            "collected memories (participant={:?}, count={})",
            participant,
            memories.len()
        );
        Ok(memories)
    }

    /// Targeted search, optionally filtered to one participant by the store.
    pub async fn query(
        &self,
        query: &str,
        participant: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TaggedMemory>, ConfabCoreError> {
        let mut request = SearchRequest::new(query, self.chat.group_id()).with_limit(limit);
        if let Some(key) = participant {
            self.chat.roster().get(key)?;
            request = request.with_filter(PARTICIPANT_KEY, key);
        }
        self.chat.search(&request).await
    }

    /// Print the memories of one participant (plus the personal/group split)
    /// or of the whole group.
    pub async fn show<W: Write>(
        &self,
        participant: Option<&str>,
        out: &mut W,
    ) -> Result<(), ConfabCoreError> {
        let name = participant
            .map(|key| self.chat.roster().display_name(key))
            .transpose()?;
        let title = match name {
            Some(name) => format!("Memories for {name}"),
            None => "All Group Memories".to_string(),
        };
        print_separator(out, Some(title.as_str()))?;

        let everything = self.memories(None).await?;
        let selected: Vec<&TaggedMemory> = everything
            .iter()
            .filter(|memory| participant.is_none_or(|key| memory.participant == key))
            .collect();
        if selected.is_empty() {
            writeln!(out, "No memories found.")?;
            return Ok(());
        }
        for memory in &selected {
            writeln!(out, "[{}] {}", memory.participant, memory.memory)?;
        }

        if let (Some(key), Some(name)) = (participant, name) {
            writeln!(
                out,
                "\n----------------- Memories for {name} (including group context) -----------------"
            )?;
            let (personal, group): (Vec<&TaggedMemory>, Vec<&TaggedMemory>) =
                everything.iter().partition(|memory| memory.participant == key);
            writeln!(out, "\n--- Personal Memories ---")?;
            for memory in personal {
                writeln!(out, "[{}] {}", memory.participant, memory.memory)?;
            }
            writeln!(out, "\n--- Group Context ---")?;
            for memory in group {
                writeln!(out, "[{}] {}", memory.participant, memory.memory)?;
            }
        }
        Ok(())
    }

    /// Print the illustrative targeted queries.
    pub async fn show_examples<W: Write>(&self, out: &mut W) -> Result<(), ConfabCoreError> {
        if let Some(first) = self.chat.roster().first() {
            let query = format!("What does {} like to do?", first.name);
            writeln!(out, "Query: {query}")?;
            for memory in self.query(&query, Some(first.key.as_str()), 3).await? {
                writeln!(
                    out,
                    "- {} (score: {})",
                    memory.memory,
                    format_score(memory.score)
                )?;
            }
            writeln!(out)?;
        }

        for (query, limit) in [
            ("What are the weekend plans?", 5),
            ("Who has dietary restrictions?", 3),
        ] {
            writeln!(out, "Query: {query}")?;
            for memory in self.query(query, None, limit).await? {
                writeln!(
                    out,
                    "- [{}] {} (score: {})",
                    memory.participant,
                    memory.memory,
                    format_score(memory.score)
                )?;
            }
            writeln!(out)?;
        }

        let query = "What activities do all participants enjoy?";
        writeln!(out, "Query: {query}")?;
        let activities = self.query(query, None, 9).await?;
        for (participant, memories) in bucket_by_participant(activities) {
            writeln!(out, "\n[{participant}]'s activities:")?;
            for memory in memories {
                writeln!(
                    out,
                    "- {} (score: {})",
                    memory.memory,
                    format_score(memory.score)
                )?;
            }
        }
        Ok(())
    }

    /// Full post-run report: each participant, the whole group, then the
    /// example queries.
    pub async fn report<W: Write>(&self, out: &mut W) -> Result<(), ConfabCoreError> {
        writeln!(out, "\nResetting all memories")?;
        writeln!(out, "Resetting index mem0...\n")?;
        let keys: Vec<String> = self.chat.roster().keys().map(str::to_string).collect();
        for key in &keys {
            self.show(Some(key.as_str()), out).await?;
        }
        self.show(None, out).await?;
        print_separator(out, Some("Memory Query Examples"))?;
        self.show_examples(out).await?;
        writeln!(
            out,
            "\n-------------------------------- Demo Complete --------------------------------"
        )?;
        Ok(())
    }
}

/// Group memories by participant, keeping first-seen participant order.
pub fn bucket_by_participant(memories: Vec<TaggedMemory>) -> Vec<(String, Vec<TaggedMemory>)> {
    let mut buckets: Vec<(String, Vec<TaggedMemory>)> = Vec::new();
    for memory in memories {
        match buckets
            .iter_mut()
            .find(|(participant, _)| *participant == memory.participant)
        {
            Some((_, bucket)) => bucket.push(memory),
            None => buckets.push((memory.participant.clone(), vec![memory])),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::bucket_by_participant;
    use crate::chat::TaggedMemory;
    use pretty_assertions::assert_eq;

    fn tagged(participant: &str, memory: &str) -> TaggedMemory {
        TaggedMemory {
            participant: participant.to_string(),
            memory: memory.to_string(),
            score: Some(0.5),
        }
    }

    #[test]
    fn buckets_keep_first_seen_order() {
        let buckets = bucket_by_participant(vec![
            tagged("bheem", "tabla"),
            tagged("archie", "dance"),
            tagged("bheem", "yoga"),
        ]);
        let summary: Vec<_> = buckets
            .iter()
            .map(|(participant, memories)| (participant.as_str(), memories.len()))
            .collect();
        assert_eq!(summary, vec![("bheem", 2), ("archie", 1)]);
    }
}
