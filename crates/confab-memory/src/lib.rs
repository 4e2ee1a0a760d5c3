//! Memory storage and recall for confab group chats.

pub mod error;
pub mod file;
pub mod in_memory;
pub mod keyword;
pub mod mem0;
pub mod model;
pub mod store;

/// Memory error type.
pub use error::MemoryError;
/// Local stores.
pub use file::FileMemoryStore;
pub use in_memory::InMemoryStore;
/// Hosted Mem0 store.
pub use mem0::{MEM0_DEFAULT_BASE_URL, Mem0Store};
/// Memory record model.
pub use model::{ChatTurn, MemoryContent, MemoryRecord, PARTICIPANT_KEY, participant_metadata};
/// Store interface and search request.
pub use store::{DEFAULT_SEARCH_LIMIT, MemoryStore, SearchRequest};
