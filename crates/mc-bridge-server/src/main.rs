mod assets;
mod config;

use std::path::PathBuf;

use config::BridgeConfig;
use mc_bridge_registry::Registries;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "bridge.toml";

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match BridgeConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", config_path.display());
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "MC-Bridge v{} building registries for {} protocol version(s)",
        env!("CARGO_PKG_VERSION"),
        config.palettes.len()
    );

    let registries = match assets::load_inputs(&config)
        .and_then(|inputs| Registries::build(inputs).map_err(Into::into))
    {
        Ok(registries) => registries,
        Err(e) => {
            error!("Registry build failed: {e}");
            std::process::exit(1);
        }
    };

    for protocol in registries.blocks().protocols() {
        if let Some(mappings) = registries.block_mappings(protocol) {
            info!(
                "Protocol {} ({}): block state version {}, {} definitions, {} waterlogged states",
                protocol,
                mappings.label(),
                mappings.block_state_version(),
                mappings.definition_registry().len(),
                mappings.waterlogged().len()
            );
        }
    }
    info!(
        "Items: {} mappings, {} creative entries, canonical protocol {}",
        registries.items().len(),
        registries.items().creative_items().count(),
        registries.canonical_blocks().protocol()
    );
    info!("Registries published");
}
