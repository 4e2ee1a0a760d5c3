//! Configuration schema for confab.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Root config for a group chat run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfabConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    /// Group identifier scoping every memory write and search.
    #[serde(default = "default_group_id")]
    pub group_id: String,
    /// Fixed roster of participants, in display order.
    #[serde(default = "default_participants")]
    pub participants: Vec<ParticipantConfig>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Scripted turns replacing the built-in scenario.
    #[serde(default)]
    pub script: Option<Vec<TurnConfig>>,
}

impl Default for ConfabConfig {
    fn default() -> Self {
        Self {
            schema: None,
            group_id: default_group_id(),
            participants: default_participants(),
            memory: MemoryConfig::default(),
            generation: GenerationConfig::default(),
            script: None,
        }
    }
}

impl ConfabConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ConfabConfigBuilder {
        ConfabConfigBuilder::new()
    }
}

/// Builder for assembling a `ConfabConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ConfabConfigBuilder {
    config: ConfabConfig,
}

impl ConfabConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ConfabConfig::default(),
        }
    }

    /// Replace the group identifier.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.config.group_id = group_id.into();
        self
    }

    /// Replace the participant roster.
    pub fn participants(mut self, participants: Vec<ParticipantConfig>) -> Self {
        self.config.participants = participants;
        self
    }

    /// Replace the memory configuration.
    pub fn memory(mut self, memory: MemoryConfig) -> Self {
        self.config.memory = memory;
        self
    }

    /// Replace the generation configuration.
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.config.generation = generation;
        self
    }

    /// Replace the scripted conversation.
    pub fn script(mut self, script: Vec<TurnConfig>) -> Self {
        self.config.script = Some(script);
        self
    }

    /// Finalize and return the built `ConfabConfig`.
    pub fn build(self) -> ConfabConfig {
        self.config
    }
}

fn default_group_id() -> String {
    "group_chat_1".to_string()
}

fn default_participants() -> Vec<ParticipantConfig> {
    vec![
        ParticipantConfig::new("archie", "Archie"),
        ParticipantConfig::new("arjun", "Arjun"),
        ParticipantConfig::new("bheem", "Bheem"),
    ]
}

/// One participant: short key plus display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantConfig {
    pub key: String,
    pub name: String,
}

impl ParticipantConfig {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// One scripted turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnConfig {
    pub participant: String,
    pub message: String,
}

/// Memory backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemoryProviderKind {
    /// Hosted Mem0 platform.
    Mem0,
    /// JSONL files on local disk.
    #[default]
    File,
    /// Process-local store, gone when the run ends.
    Memory,
}

/// Memory store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub provider: MemoryProviderKind,
    /// Root directory for the file provider.
    #[serde(default)]
    pub path: Option<String>,
    /// Override for the Mem0 endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the Mem0 API key.
    #[serde(default = "default_memory_api_key_env")]
    pub api_key_env: String,
    /// Result cap for the per-message context search.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            provider: MemoryProviderKind::default(),
            path: None,
            base_url: None,
            api_key_env: default_memory_api_key_env(),
            search_limit: default_search_limit(),
        }
    }
}

impl MemoryConfig {
    /// Root directory for the file provider, falling back to `.confab/memory`.
    pub fn path_or_default(&self) -> String {
        self.path
            .clone()
            .unwrap_or_else(|| ".confab/memory".to_string())
    }

    /// Resolve the Mem0 API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        crate::loader::credential_from_env(&self.api_key_env)
    }
}

fn default_memory_api_key_env() -> String {
    "MEM0_API_KEY".to_string()
}

fn default_search_limit() -> usize {
    100
}

/// Generation model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the Gemini API key.
    #[serde(default = "default_generation_api_key_env")]
    pub api_key_env: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_generation_api_key_env(),
        }
    }
}

impl GenerationConfig {
    /// Resolve the Gemini API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        crate::loader::credential_from_env(&self.api_key_env)
    }
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-04-17".to_string()
}

fn default_generation_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
