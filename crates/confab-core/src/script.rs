//! Scripted conversation driver.

use crate::chat::GroupChat;
use crate::display::print_separator;
use crate::error::ConfabCoreError;
use confab_config::ConfabConfig;
use log::info;
use std::io::Write;

/// One scripted (participant, message) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub participant: String,
    pub message: String,
}

impl Turn {
    pub fn new(participant: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            message: message.into(),
        }
    }
}

const REFERENCE_TURNS: [(&str, &str); 12] = [
    (
        "archie",
        "Hi everyone! I'm Archie. I love classical dance and reading mythological books.",
    ),
    (
        "arjun",
        "Hey there, I'm Arjun. I'm really into cricket and food photography.",
    ),
    ("bheem", "Hello! Bheem here. I enjoy playing tabla and yoga."),
    (
        "archie",
        "What should we do this weekend? I was thinking maybe a trip to Elephanta Caves?",
    ),
    (
        "arjun",
        "The caves sound amazing! I could bring my camera and take some heritage photos. Maybe I can also pack us some homemade biryani?",
    ),
    (
        "bheem",
        "I'm definitely in for the caves. The weather forecast says it's going to be pleasant at 24°C.",
    ),
    (
        "archie",
        "Perfect! Let's meet at the Gateway of India at 9am on Saturday. The ferry ride is about 1 hour.",
    ),
    (
        "arjun",
        "9am works for me. I'll prepare some biryani and snacks. Any food preferences or allergies I should know about?",
    ),
    (
        "bheem",
        "I'm vegetarian, but otherwise I eat anything. I can bring some lassi and nimbu pani for everyone.",
    ),
    (
        "archie",
        "Great! So we're set for Saturday at 9am. I'll bring a first aid kit and guide book.",
    ),
    (
        "arjun",
        "I'll make sure to pack both veg and non-veg options. Looking forward to our trip!",
    ),
    (
        "bheem",
        "Sounds like a plan! I'll also bring some masala chai in a thermos. See you all on Saturday!",
    ),
];

/// Ordered turns replayed against a chat, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationScript {
    turns: Vec<Turn>,
}

impl ConversationScript {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Three friends planning a weekend trip to the Elephanta Caves.
    pub fn reference() -> Self {
        Self::new(
            REFERENCE_TURNS
                .iter()
                .map(|(participant, message)| Turn::new(*participant, *message))
                .collect(),
        )
    }

    /// The configured script, or the reference scenario when none is set.
    pub fn from_config(config: &ConfabConfig) -> Self {
        match &config.script {
            Some(turns) => Self::new(
                turns
                    .iter()
                    .map(|turn| Turn::new(turn.participant.clone(), turn.message.clone()))
                    .collect(),
            ),
            None => Self::reference(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Play every turn in order, printing each message and reply.
    ///
    /// Returns the number of turns played. The first failing turn aborts the
    /// run.
    pub async fn run<W: Write>(
        &self,
        chat: &GroupChat,
        out: &mut W,
    ) -> Result<usize, ConfabCoreError> {
        print_separator(out, Some("Group Chat Simulation"))?;
        for (index, turn) in self.turns.iter().enumerate() {
            let name = chat.roster().display_name(&turn.participant)?;
            writeln!(out, "\n{name}: {}", turn.message)?;
            let reply = chat.process(&turn.participant, &turn.message).await?;
            writeln!(out, "Assistant: {reply}")?;
            info!("turn {} of {} complete", index + 1, self.turns.len());
        }
        Ok(self.turns.len())
    }
}
