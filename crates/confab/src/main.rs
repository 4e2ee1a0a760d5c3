//! Replays a scripted group chat and reports what the memory store kept.

use anyhow::Context;
use confab::config::ConfabConfig;
use confab::core::{ConversationScript, GroupChat, LlmGenerator, MemoryInspector};
use confab::{init_logging, memory_store_from_config};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let config = ConfabConfig::discover(&cwd).context("failed to load config")?;

    let store = memory_store_from_config(&config)?;
    let api_key = config
        .generation
        .api_key()
        .context("gemini generation needs an API key")?;
    let generator = LlmGenerator::gemini(api_key, &config.generation.model)
        .context("failed to build Gemini LLM provider")?;
    let chat = GroupChat::from_config(&config, store, Arc::new(generator));

    chat.reset().await.context("failed to reset memory store")?;

    let script = ConversationScript::from_config(&config);
    let mut stdout = std::io::stdout().lock();
    let played = script
        .run(&chat, &mut stdout)
        .await
        .context("group chat simulation failed")?;
    info!("simulation finished (turns={played})");

    MemoryInspector::new(&chat)
        .report(&mut stdout)
        .await
        .context("memory report failed")?;

    Ok(())
}
