use confab_config::ConfabConfig;
use confab_core::{Generator, GroupChat, Roster};
use confab_memory::MemoryStore;
use std::sync::Arc;

pub const TEST_GROUP: &str = "group_chat_1";

pub fn reference_roster() -> Roster {
    Roster::from_config(&ConfabConfig::default().participants)
}

pub fn chat_with(store: Arc<dyn MemoryStore>, generator: Arc<dyn Generator>) -> GroupChat {
    GroupChat::new(store, generator, TEST_GROUP, reference_roster())
}
