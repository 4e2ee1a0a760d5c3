//! Test helpers shared across confab crates.

pub mod context;
pub mod generator;
pub mod llm;
pub mod memory;

pub use context::{TEST_GROUP, chat_with, reference_roster};
pub use generator::{EchoGenerator, FailingGenerator, FixedGenerator};
pub use llm::{FailingLLM, FixedChatResponse, FixedLLM};
pub use memory::{FailingStore, RecordedWrite, RecordingStore, StubStore};
