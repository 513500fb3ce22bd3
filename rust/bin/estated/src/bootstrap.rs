//! Bootstrap: startup checks and seeding the record store.

use anyhow::Context;
use estate_core::ServiceConfig;
use property::seed::SeedLoader;
use property::store::RecordStore;
use tracing::info;

/// Refuse to start with an unusable configuration.
pub fn verify_config(config: &ServiceConfig) -> anyhow::Result<()> {
    if config.listen.trim().is_empty() {
        anyhow::bail!("Listen address is empty in configuration.");
    }
    Ok(())
}

/// Fill `store` from the seed file. Returns the number of records loaded.
pub fn load_seed(config: &ServiceConfig, store: &dyn RecordStore) -> anyhow::Result<usize> {
    let path = config.resolve_seed_path();
    info!("Loading seed data from {}", path.display());
    SeedLoader::load_into(&path, store)
        .with_context(|| format!("failed to load seed file {}", path.display()))
}
