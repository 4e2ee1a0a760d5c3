//! Fixed participant roster.

use crate::error::ConfabCoreError;
use confab_config::ParticipantConfig;

/// A conversational actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Short key used in memory metadata.
    pub key: String,
    /// Name shown in prompts and output.
    pub name: String,
}

impl Participant {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Ordered participant set defined once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn from_config(participants: &[ParticipantConfig]) -> Self {
        Self::new(
            participants
                .iter()
                .map(|p| Participant::new(p.key.clone(), p.name.clone()))
                .collect(),
        )
    }

    /// Look up a participant by key.
    pub fn get(&self, key: &str) -> Result<&Participant, ConfabCoreError> {
        self.participants
            .iter()
            .find(|participant| participant.key == key)
            .ok_or_else(|| ConfabCoreError::UnknownParticipant(key.to_string()))
    }

    /// Display name for a key.
    pub fn display_name(&self, key: &str) -> Result<&str, ConfabCoreError> {
        self.get(key).map(|participant| participant.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.key.as_str())
    }

    pub fn first(&self) -> Option<&Participant> {
        self.participants.first()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Participant, Roster};
    use crate::error::ConfabCoreError;
    use confab_config::ConfabConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_by_key() {
        let roster = Roster::from_config(&ConfabConfig::default().participants);
        assert_eq!(roster.display_name("arjun").expect("arjun"), "Arjun");
        assert_eq!(roster.keys().collect::<Vec<_>>(), vec!["archie", "arjun", "bheem"]);
        assert_eq!(roster.first(), Some(&Participant::new("archie", "Archie")));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let roster = Roster::new(vec![Participant::new("a", "A")]);
        let err = roster.display_name("zed").unwrap_err();
        assert!(matches!(err, ConfabCoreError::UnknownParticipant(key) if key == "zed"));
    }
}
