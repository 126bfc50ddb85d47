//! The published registry value handed to every connection.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::block_registry::{BlockMappings, BlockRegistries, PaletteVersion};
use crate::error::RegistryError;
use crate::interactions::{InteractionSets, RawInteractions};
use crate::item_mappings::ItemMappings;
use crate::item_registry::{build_item_mappings, RawItemDefinition, RawItemTable};
use crate::source_blocks::{RawBlockTable, SourceBlockRegistry};

/// Everything the build reads, already parsed and decoded.
#[derive(Debug, Clone, Default)]
pub struct RegistryInputs {
    pub blocks: RawBlockTable,
    pub palettes: Vec<PaletteVersion>,
    /// Protocol whose block mappings items resolve against. Highest if unset.
    pub canonical_protocol: Option<u32>,
    pub items: RawItemTable,
    pub item_definitions: Vec<RawItemDefinition>,
    pub creative_items: Vec<String>,
    pub interactions: RawInteractions,
}

/// All block and item registries, immutable once built.
#[derive(Debug)]
pub struct Registries {
    source_blocks: SourceBlockRegistry,
    blocks: BlockRegistries,
    canonical_blocks: Arc<BlockMappings>,
    interactions: InteractionSets,
    items: ItemMappings,
}

impl Registries {
    /// Build every registry. Either all of them are built or none is returned.
    pub fn build(inputs: RegistryInputs) -> Result<Arc<Self>, RegistryError> {
        let RegistryInputs {
            blocks,
            palettes,
            canonical_protocol,
            items,
            item_definitions,
            creative_items,
            interactions,
        } = inputs;

        let source_blocks = SourceBlockRegistry::from_raw(&blocks)?;
        let block_registries = BlockRegistries::build(&source_blocks, palettes)?;

        let canonical_blocks = match canonical_protocol {
            Some(protocol) => block_registries.get(protocol),
            None => block_registries.latest(),
        }
        .cloned()
        .ok_or_else(|| {
            RegistryError::MissingAsset(format!(
                "no block palette for canonical protocol {}",
                canonical_protocol.unwrap_or_default()
            ))
        })?;

        let interactions = InteractionSets::build(&interactions, &source_blocks)?;
        let items = build_item_mappings(
            &items,
            &item_definitions,
            &creative_items,
            &canonical_blocks,
        )?;

        info!(
            "Registries ready: {} source block states, {} protocol version(s), {} items",
            source_blocks.len(),
            block_registries.len(),
            items.len()
        );

        Ok(Arc::new(Self {
            source_blocks,
            blocks: block_registries,
            canonical_blocks,
            interactions,
            items,
        }))
    }

    pub fn source_blocks(&self) -> &SourceBlockRegistry {
        &self.source_blocks
    }

    pub fn blocks(&self) -> &BlockRegistries {
        &self.blocks
    }

    pub fn block_mappings(&self, protocol: u32) -> Option<&Arc<BlockMappings>> {
        self.blocks.get(protocol)
    }

    /// Mappings of the protocol items were resolved against.
    pub fn canonical_blocks(&self) -> &Arc<BlockMappings> {
        &self.canonical_blocks
    }

    pub fn java_to_bedrock_identifiers(&self) -> &HashMap<Arc<str>, String> {
        self.source_blocks.java_to_bedrock_identifiers()
    }

    /// Target identifier for a clean source block identifier.
    pub fn bedrock_identifier(&self, clean_java_identifier: &str) -> Option<&str> {
        self.java_to_bedrock_identifiers()
            .get(clean_java_identifier)
            .map(String::as_str)
    }

    pub fn interactions(&self) -> &InteractionSets {
        &self.interactions
    }

    pub fn items(&self) -> &ItemMappings {
        &self.items
    }
}
