//! Reply generation seam and its LLM-backed implementation.

use async_trait::async_trait;
use autoagents_llm::LLMProvider;
use autoagents_llm::backends::google::Google;
use autoagents_llm::builder::LLMBuilder;
use autoagents_llm::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, MessageType};
use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by reply generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model provider failed.
    #[error("provider error: {0}")]
    Provider(String),
    /// The model answered without any text.
    #[error("model returned no text")]
    EmptyResponse,
}

#[async_trait]
/// Turns one flattened prompt into one reply.
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generator backed by an `autoagents` LLM provider.
#[derive(Clone)]
pub struct LlmGenerator {
    llm: Arc<dyn LLMProvider>,
}

impl LlmGenerator {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }

    /// Build a Gemini-backed generator.
    pub fn gemini(api_key: impl Into<String>, model: &str) -> Result<Self, GenerationError> {
        info!("building gemini LLM provider (model={model})");
        let llm: Arc<dyn LLMProvider> = LLMBuilder::<Google>::new()
            .api_key(api_key.into())
            .model(model)
            .build()
            .map_err(|err| GenerationError::Provider(err.to_string()))?;
        Ok(Self::new(llm))
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    /// Send the prompt as a single user message and return the text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let messages = [ChatMessage {
            role: ChatRole::User,
            message_type: MessageType::Text,
            content: prompt.to_string(),
        }];
        let response: Box<dyn ChatResponse> = self
            .llm
            .chat_with_tools(&messages, None, None)
            .await
            .map_err(|err| GenerationError::Provider(err.to_string()))?;
        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;
        debug!("generated reply (prompt_len={}, reply_len={})", prompt.len(), text.len());
        Ok(text)
    }
}
