//! Config file discovery, parsing and validation.

#[cfg(test)]
mod tests;

use crate::{ConfabConfig, ConfigError};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "confab.json5";
/// Environment variable naming an explicit config path.
pub const CONFIG_ENV_VAR: &str = "CONFAB_CONFIG";

impl ConfabConfig {
    /// Load a config from a path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value)
    }

    /// Discover the config for a run.
    ///
    /// Uses the path in `CONFAB_CONFIG` when set, then `confab.json5` under
    /// `cwd`, and otherwise the built-in defaults.
    pub fn discover(cwd: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::discover_with(cwd, explicit)
    }

    /// Discovery with the explicit path supplied by the caller.
    pub fn discover_with(
        cwd: impl AsRef<Path>,
        explicit: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        let local = cwd.as_ref().join(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from_path(local);
        }
        debug!("no config file found; using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_id.trim().is_empty() {
            return Err(invalid("group_id", "must not be empty"));
        }
        if self.participants.is_empty() {
            return Err(invalid("participants", "at least one participant is required"));
        }
        let mut keys = HashSet::new();
        for (index, participant) in self.participants.iter().enumerate() {
            if participant.key.trim().is_empty() {
                return Err(invalid(
                    &format!("participants[{index}].key"),
                    "must not be empty",
                ));
            }
            if participant.name.trim().is_empty() {
                return Err(invalid(
                    &format!("participants[{index}].name"),
                    "must not be empty",
                ));
            }
            if !keys.insert(participant.key.as_str()) {
                return Err(invalid(
                    &format!("participants[{index}].key"),
                    &format!("duplicate participant key '{}'", participant.key),
                ));
            }
        }
        if let Some(script) = &self.script {
            for (index, turn) in script.iter().enumerate() {
                if !keys.contains(turn.participant.as_str()) {
                    return Err(invalid(
                        &format!("script[{index}].participant"),
                        &format!("unknown participant '{}'", turn.participant),
                    ));
                }
            }
        }
        if self.memory.search_limit == 0 {
            return Err(invalid("memory.search_limit", "must be greater than zero"));
        }
        if self.generation.model.trim().is_empty() {
            return Err(invalid("generation.model", "must not be empty"));
        }
        Ok(())
    }
}

fn config_from_value(value: Value) -> Result<ConfabConfig, ConfigError> {
    let config: ConfabConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

fn invalid(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}

/// Read a non-empty credential from the environment.
pub(crate) fn credential_from_env(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(var.to_string())),
    }
}
