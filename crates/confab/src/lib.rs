//! Public surface for confab.
//!
//! This crate re-exports the building blocks and provides the small setup
//! helpers the binary uses, so embedding a run elsewhere stays consistent.

/// Re-export for convenience.
pub use confab_config as config;
pub use confab_core as core;
/// Re-export for convenience.
pub use confab_memory as memory;

use anyhow::Context;
use confab_config::{ConfabConfig, MemoryProviderKind};
use confab_memory::{FileMemoryStore, InMemoryStore, Mem0Store, MemoryStore};
use log::info;
use std::sync::Arc;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Build the memory store selected by `memory.provider`.
pub fn memory_store_from_config(config: &ConfabConfig) -> anyhow::Result<Arc<dyn MemoryStore>> {
    let memory = &config.memory;
    let store: Arc<dyn MemoryStore> = match memory.provider {
        MemoryProviderKind::Mem0 => {
            let api_key = memory
                .api_key()
                .context("mem0 memory provider needs an API key")?;
            let mut store = Mem0Store::new(api_key)
                .context("failed to build mem0 client")?
                .with_group(config.group_id.clone());
            if let Some(base_url) = &memory.base_url {
                store = store.with_base_url(base_url.clone());
            }
            Arc::new(store)
        }
        MemoryProviderKind::File => {
            let root = memory.path_or_default();
            Arc::new(FileMemoryStore::new(&root).context("failed to create memory store")?)
        }
        MemoryProviderKind::Memory => Arc::new(InMemoryStore::new()),
    };
    info!("memory provider selected: {:?}", memory.provider);
    Ok(store)
}
