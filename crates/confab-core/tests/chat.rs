//! Message processor tests against recording stores and stub generators.

use confab_core::{ConfabCoreError, GroupChat};
use confab_memory::{InMemoryStore, MemoryContent, MemoryRecord, MemoryStore, SearchRequest};
use confab_test_utils::{
    EchoGenerator, FailingGenerator, FailingStore, FixedGenerator, RecordingStore, StubStore,
    TEST_GROUP, chat_with,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

/// Each known participant gets a reply and exactly two tagged writes.
#[tokio::test]
async fn process_writes_twice_per_turn_for_every_participant() {
    for key in ["archie", "arjun", "bheem"] {
        let store = RecordingStore::new();
        let chat = chat_with(Arc::new(store.clone()), Arc::new(FixedGenerator::new("Lovely!")));

        let reply = chat.process(key, "I love trips.").await.expect("process");

        assert_eq!(reply, "Lovely!");
        let writes = store.writes.lock().clone();
        assert_eq!(writes.len(), 2);
        for write in &writes {
            assert_eq!(write.group_id, TEST_GROUP);
            assert_eq!(write.metadata["participant"], json!(key));
        }
        assert_eq!(writes[0].content, MemoryContent::Text("I love trips.".to_string()));
        assert_eq!(
            writes[1].content.to_text(),
            "user: I love trips.\nassistant: Lovely!"
        );
    }
}

/// Unknown keys fail before the store or generator is touched.
#[tokio::test]
async fn unknown_participant_fails_before_any_io() {
    let store = RecordingStore::new();
    let generator = FixedGenerator::new("unused");
    let chat = chat_with(Arc::new(store.clone()), Arc::new(generator.clone()));

    let err = chat.process("nobody", "hello").await.unwrap_err();

    assert!(matches!(err, ConfabCoreError::UnknownParticipant(ref key) if key == "nobody"));
    assert_eq!(store.write_count(), 0);
    assert_eq!(store.search_count(), 0);
    assert_eq!(generator.call_count(), 0);
}

/// The prompt names the speaker and carries earlier memories from the group.
#[tokio::test]
async fn prompt_includes_recalled_memories() {
    let store = Arc::new(InMemoryStore::new());
    let generator = FixedGenerator::new("Noted!");
    let chat = chat_with(store.clone(), Arc::new(generator.clone()));

    chat.process("bheem", "I'm vegetarian.").await.expect("first");
    chat.process("arjun", "Any food preferences?").await.expect("second");

    let prompt = generator.last_prompt().expect("prompt");
    assert!(prompt.contains("You are currently talking to Arjun."));
    assert!(prompt.contains("Previous memories from the conversation:"));
    assert!(prompt.contains("- I'm vegetarian. (from: bheem)"));
    assert!(prompt.ends_with("Current message from Arjun: Any food preferences?"));
    assert_eq!(store.len(), 4);
}

/// With a store that never returns hits the context block is empty.
#[tokio::test]
async fn empty_search_leaves_context_blank() {
    let generator = FixedGenerator::new("Hi!");
    let chat = chat_with(Arc::new(StubStore::new()), Arc::new(generator.clone()));

    chat.process("archie", "Hello").await.expect("process");

    let prompt = generator.last_prompt().expect("prompt");
    assert!(!prompt.contains("Previous memories"));
}

/// The reply is returned verbatim.
#[tokio::test]
async fn echo_generator_reply_is_untouched() {
    let chat = chat_with(Arc::new(InMemoryStore::new()), Arc::new(EchoGenerator));
    let reply = chat.process("archie", "  spaced  ").await.expect("process");
    assert!(reply.ends_with("Current message from Archie:   spaced  "));
}

/// Generation failures propagate and skip the second write.
#[tokio::test]
async fn generation_failure_propagates() {
    let store = RecordingStore::new();
    let chat = chat_with(
        Arc::new(store.clone()),
        Arc::new(FailingGenerator::new("quota exceeded")),
    );

    let err = chat.process("arjun", "hello").await.unwrap_err();

    assert!(matches!(err, ConfabCoreError::Generation(ref msg) if msg.contains("quota exceeded")));
    assert_eq!(store.write_count(), 1);
}

/// Store failures propagate as memory errors.
#[tokio::test]
async fn store_failure_propagates() {
    let chat = chat_with(
        Arc::new(FailingStore::new("unavailable")),
        Arc::new(FixedGenerator::new("unused")),
    );
    let err = chat.process("arjun", "hello").await.unwrap_err();
    assert!(matches!(err, ConfabCoreError::Memory(_)));
    assert!(matches!(chat.reset().await, Err(ConfabCoreError::Memory(_))));
}

/// A search hit without a participant tag is an explicit error.
#[tokio::test]
async fn malformed_search_result_is_an_error() {
    let orphan = MemoryRecord::new(TEST_GROUP, "who said this?", serde_json::Map::new());
    let chat = chat_with(
        Arc::new(StubStore::with_results(vec![orphan])),
        Arc::new(FixedGenerator::new("unused")),
    );
    let err = chat.process("archie", "hello").await.unwrap_err();
    assert!(matches!(err, ConfabCoreError::MalformedRecord(_)));
}

/// Reset clears everything the store held.
#[tokio::test]
async fn search_after_reset_is_empty() {
    let store = Arc::new(InMemoryStore::new());
    let chat = chat_with(store.clone(), Arc::new(FixedGenerator::new("ok")));
    chat.process("archie", "I love reading.").await.expect("process");

    chat.reset().await.expect("reset");

    let results = store
        .search(&SearchRequest::new("reading", TEST_GROUP))
        .await
        .expect("search");
    assert!(results.is_empty());
}

/// Config supplies the group, roster and context search limit.
#[tokio::test]
async fn from_config_applies_group_and_limit() {
    let config = confab_config::ConfabConfig::builder()
        .group_id("book_club")
        .memory(confab_config::MemoryConfig {
            search_limit: 1,
            ..confab_config::MemoryConfig::default()
        })
        .build();
    let store = RecordingStore::new();
    let chat = GroupChat::from_config(
        &config,
        Arc::new(store.clone()),
        Arc::new(FixedGenerator::new("ok")),
    );

    chat.process("bheem", "hi").await.expect("process");

    assert_eq!(chat.group_id(), "book_club");
    let searches = store.searches.lock().clone();
    assert_eq!(searches[0].group_id, "book_club");
    assert_eq!(searches[0].limit, 1);
}
