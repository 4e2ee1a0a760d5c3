//! Core group chat primitives for confab.
//!
//! This crate owns the participant roster, prompt assembly, the generation
//! seam, the message processor, the scripted conversation driver and the
//! memory inspector.

pub mod chat;
pub mod display;
pub mod error;
pub mod generation;
pub mod inspector;
pub mod participants;
pub mod script;

/// Group chat context and message processing.
pub use chat::{GroupChat, TaggedMemory};
pub use error::ConfabCoreError;
/// Reply generation seam.
pub use generation::{GenerationError, Generator, LlmGenerator};
/// Memory reporting.
pub use inspector::{CATCH_ALL_QUERY, MemoryInspector};
pub use participants::{Participant, Roster};
/// Scripted conversation driver.
pub use script::{ConversationScript, Turn};
