//! Conversation driver tests.

use confab_core::{ConfabCoreError, ConversationScript, Turn};
use confab_memory::InMemoryStore;
use confab_test_utils::{FixedGenerator, RecordingStore, chat_with};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// The reference script plays every turn in order with two writes each.
#[tokio::test]
async fn reference_script_plays_all_turns() {
    let store = RecordingStore::new();
    let generator = FixedGenerator::new("How exciting!");
    let chat = chat_with(Arc::new(store.clone()), Arc::new(generator.clone()));
    let mut out = Vec::new();

    let played = ConversationScript::reference()
        .run(&chat, &mut out)
        .await
        .expect("run");

    assert_eq!(played, 12);
    assert_eq!(store.write_count(), 24);
    assert_eq!(generator.call_count(), 12);

    let speakers: Vec<String> = store
        .writes
        .lock()
        .iter()
        .step_by(2)
        .map(|write| write.metadata["participant"].as_str().unwrap_or_default().to_string())
        .collect();
    let expected: Vec<String> = ConversationScript::reference()
        .turns()
        .iter()
        .map(|turn| turn.participant.clone())
        .collect();
    assert_eq!(speakers, expected);

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains(" Group Chat Simulation "));
    assert!(text.contains("\nArchie: Hi everyone! I'm Archie."));
    assert_eq!(text.matches("Assistant: How exciting!").count(), 12);
}

/// A bad turn stops the run before later turns are played.
#[tokio::test]
async fn unknown_participant_aborts_the_run() {
    let store = Arc::new(InMemoryStore::new());
    let chat = chat_with(store.clone(), Arc::new(FixedGenerator::new("ok")));
    let script = ConversationScript::new(vec![
        Turn::new("archie", "Hello"),
        Turn::new("mallory", "Let me in"),
        Turn::new("bheem", "Never reached"),
    ]);
    let mut out = Vec::new();

    let err = script.run(&chat, &mut out).await.unwrap_err();

    assert!(matches!(err, ConfabCoreError::UnknownParticipant(ref key) if key == "mallory"));
    assert_eq!(store.len(), 2);
    assert!(!String::from_utf8(out).expect("utf8").contains("Never reached"));
}
