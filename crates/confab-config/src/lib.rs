//! Configuration models and config loading.
//!
//! This crate owns the confab config schema, validation, and the lookup of
//! credentials named by the config.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Config discovery constants.
pub use loader::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
/// Configuration schema models.
pub use model::*;
