//! Reply prompt assembly.

const PERSONA: &str = "You are a friendly and engaging assistant in a group chat. \
Your role is to acknowledge and respond to messages in a warm, conversational manner.";

const RESPONSE_RULES: [&str; 8] = [
    "Keep responses warm and friendly, using emojis naturally",
    "Reference previous context when relevant",
    "Keep responses brief but engaging",
    "Acknowledge specific details mentioned in the message",
    "Show enthusiasm about shared interests and plans",
    "If you don't have enough context, give a friendly acknowledgment",
    "Don't make assumptions beyond what's explicitly shared",
    "Don't suggest new plans unless they were mentioned",
];

/// Build the single instruction prompt sent to the model for one message.
pub fn build_reply_prompt(name: &str, memory_context: &str, message: &str) -> String {
    let rules = RESPONSE_RULES
        .iter()
        .enumerate()
        .map(|(index, rule)| format!("{}. {rule}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{PERSONA}\n\n\
You are currently talking to {name}.\n\
{memory_context}\n\n\
Rules for your response:\n\
{rules}\n\n\
Current message from {name}: {message}"
    )
}
