use crate::{
    ConfabConfig, ConfigError, GenerationConfig, MemoryConfig, MemoryProviderKind,
    ParticipantConfig, TurnConfig,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_cover_the_reference_roster() {
    let config = ConfabConfig::default();
    assert_eq!(config.group_id, "group_chat_1");
    let keys: Vec<_> = config.participants.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["archie", "arjun", "bheem"]);
    assert_eq!(config.memory.provider, MemoryProviderKind::File);
    assert_eq!(config.memory.search_limit, 100);
    assert_eq!(config.generation.api_key_env, "GEMINI_API_KEY");
    config.validate().expect("defaults validate");
}

#[test]
fn load_from_str_accepts_json5_and_fills_defaults() {
    let config = ConfabConfig::load_from_str(
        r#"{
            // comments are fine
            group_id: 'book_club',
            memory: { provider: 'mem0', base_url: 'http://localhost:8888' },
        }"#,
    )
    .expect("config");
    assert_eq!(config.group_id, "book_club");
    assert_eq!(config.memory.provider, MemoryProviderKind::Mem0);
    assert_eq!(config.memory.api_key_env, "MEM0_API_KEY");
    assert_eq!(config.participants.len(), 3);
    assert_eq!(config.generation.model, "gemini-2.5-flash-preview-04-17");
}

#[test]
fn duplicate_participant_keys_are_rejected() {
    let err = ConfabConfig::load_from_str(
        r#"{ participants: [
            { key: 'a', name: 'A' },
            { key: 'a', name: 'Again' },
        ] }"#,
    )
    .unwrap_err();
    match err {
        ConfigError::InvalidField { path, .. } => assert_eq!(path, "participants[1].key"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn script_must_reference_known_participants() {
    let config = ConfabConfig::builder()
        .script(vec![TurnConfig {
            participant: "nobody".to_string(),
            message: "hi".to_string(),
        }])
        .build();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidField { ref path, .. } if path == "script[0].participant"));
}

#[test]
fn zero_search_limit_is_rejected() {
    let config = ConfabConfig::builder()
        .memory(MemoryConfig {
            search_limit: 0,
            ..MemoryConfig::default()
        })
        .build();
    assert!(config.validate().is_err());
}

#[test]
fn builder_replaces_sections() {
    let config = ConfabConfig::builder()
        .group_id("trip")
        .participants(vec![ParticipantConfig::new("solo", "Solo")])
        .generation(GenerationConfig {
            model: "gemini-2.0-flash".to_string(),
            ..GenerationConfig::default()
        })
        .build();
    assert_eq!(config.group_id, "trip");
    assert_eq!(config.participants, vec![ParticipantConfig::new("solo", "Solo")]);
    assert_eq!(config.generation.model, "gemini-2.0-flash");
}

#[test]
fn discover_prefers_explicit_then_local_file() {
    let temp = tempdir().expect("tempdir");
    let config = ConfabConfig::discover_with(temp.path(), None).expect("defaults");
    assert_eq!(config.group_id, "group_chat_1");

    fs::write(temp.path().join("confab.json5"), "{ group_id: 'local' }").expect("write");
    let config = ConfabConfig::discover_with(temp.path(), None).expect("local");
    assert_eq!(config.group_id, "local");

    let explicit = temp.path().join("other.json5");
    fs::write(&explicit, "{ group_id: 'explicit' }").expect("write");
    let config = ConfabConfig::discover_with(temp.path(), Some(explicit)).expect("explicit");
    assert_eq!(config.group_id, "explicit");
}

#[test]
fn missing_credential_names_the_variable() {
    let generation = GenerationConfig {
        api_key_env: "CONFAB_TEST_UNSET_CREDENTIAL".to_string(),
        ..GenerationConfig::default()
    };
    match generation.api_key().unwrap_err() {
        ConfigError::MissingCredential(var) => assert_eq!(var, "CONFAB_TEST_UNSET_CREDENTIAL"),
        other => panic!("unexpected error: {other}"),
    }
}
