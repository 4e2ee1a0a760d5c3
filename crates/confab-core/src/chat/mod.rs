//! Group chat context and the per-message processing round trip.

mod memory;
pub mod prompt;

pub use memory::{TaggedMemory, format_memory_context};
pub(crate) use memory::{sort_by_score, tag_records};

use crate::error::ConfabCoreError;
use crate::generation::Generator;
use crate::participants::Roster;
use confab_config::ConfabConfig;
use confab_memory::{
    ChatTurn, DEFAULT_SEARCH_LIMIT, MemoryContent, MemoryStore, SearchRequest,
    participant_metadata,
};
use log::{debug, info};
use prompt::build_reply_prompt;
use std::sync::Arc;

/// Everything one chat run needs: both collaborator handles, the group and
/// the roster.
#[derive(Clone)]
pub struct GroupChat {
    store: Arc<dyn MemoryStore>,
    generator: Arc<dyn Generator>,
    group_id: String,
    roster: Roster,
    search_limit: usize,
}

impl GroupChat {
    pub fn new(
        store: Arc<dyn MemoryStore>,
        generator: Arc<dyn Generator>,
        group_id: impl Into<String>,
        roster: Roster,
    ) -> Self {
        Self {
            store,
            generator,
            group_id: group_id.into(),
            roster,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Build a chat from config with the given collaborators.
    pub fn from_config(
        config: &ConfabConfig,
        store: Arc<dyn MemoryStore>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self::new(
            store,
            generator,
            config.group_id.clone(),
            Roster::from_config(&config.participants),
        )
        .with_search_limit(config.memory.search_limit)
    }

    /// Cap the number of memories pulled into each prompt.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Clear the memory store.
    pub async fn reset(&self) -> Result<(), ConfabCoreError> {
        info!("resetting memory store (group_id={})", self.group_id);
        self.store
            .reset()
            .await
            .map_err(|err| ConfabCoreError::Memory(err.to_string()))
    }

    /// Handle one message and return the generated reply.
    ///
    /// The message is stored, relevant memories are recalled into the prompt,
    /// the reply is generated, and the exchange is stored. Both writes carry
    /// the group id and the participant tag.
    pub async fn process(
        &self,
        participant: &str,
        message: &str,
    ) -> Result<String, ConfabCoreError> {
        let name = self.roster.display_name(participant)?;

        self.store
            .add(
                MemoryContent::Text(message.to_string()),
                &self.group_id,
                participant_metadata(participant),
            )
            .await
            .map_err(|err| ConfabCoreError::Memory(err.to_string()))?;

        let request = SearchRequest::new(message, self.group_id.as_str())
            .with_limit(self.search_limit);
        let relevant = self.search(&request).await?;
        let context = format_memory_context(&relevant);
        let prompt = build_reply_prompt(name, &context, message);
        debug!(
            "generating reply (participant={}, memories={}, prompt_len={})",
            participant,
            relevant.len(),
            prompt.len()
        );

        let reply = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|err| ConfabCoreError::Generation(err.to_string()))?;

        let exchange = vec![ChatTurn::user(message), ChatTurn::assistant(reply.clone())];
        self.store
            .add(
                MemoryContent::Messages(exchange),
                &self.group_id,
                participant_metadata(participant),
            )
            .await
            .map_err(|err| ConfabCoreError::Memory(err.to_string()))?;

        Ok(reply)
    }

    /// Run a search and attribute every hit to a participant.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<TaggedMemory>, ConfabCoreError> {
        let records = self
            .store
            .search(request)
            .await
            .map_err(|err| ConfabCoreError::Memory(err.to_string()))?;
        tag_records(records)
    }
}
