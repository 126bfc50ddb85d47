//! Per-protocol block mappings: every source state resolved to a palette entry.
//!
//! Each protocol version is built from its own palette and quirk table with no
//! shared state, so versions build in parallel and are published together.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use mc_bridge_nbt::NbtCompound;
use rayon::prelude::*;
use tracing::info;

use crate::definition::{BlockDefinition, BlockDefinitionRegistry};
use crate::error::RegistryError;
use crate::palette::PaletteIndex;
use crate::quirks::QuirkTable;
use crate::source_blocks::SourceBlockRegistry;
use crate::state::CanonicalKey;
use crate::state_key::compose_key;

pub const AIR_STATE: &str = "minecraft:air";
pub const WATER_STATE: &str = "minecraft:water[level=0]";
pub const COMMAND_BLOCK_STATE: &str = "minecraft:command_block[conditional=false,facing=north]";
pub const MOVING_PISTON_STATE: &str = "minecraft:moving_piston[facing=north,type=normal]";

/// Blocks that always contain water, whatever their properties say.
const ALWAYS_WATERLOGGED: [&str; 3] = ["minecraft:bubble_column", "minecraft:kelp", "seagrass"];

const ITEM_FRAMES: [&str; 2] = ["minecraft:frame", "minecraft:glow_frame"];

/// Whether a source state holds water.
pub fn is_waterlogged_state(java_identifier: &str) -> bool {
    java_identifier.contains("waterlogged=true")
        || ALWAYS_WATERLOGGED
            .iter()
            .any(|family| java_identifier.contains(family))
}

/// Input for one protocol version: its decoded palette and quirk rules.
#[derive(Debug, Clone)]
pub struct PaletteVersion {
    pub protocol: u32,
    /// Release label, e.g. `1_19_20`.
    pub label: String,
    pub quirks: QuirkTable,
    pub palette: Vec<NbtCompound>,
}

#[derive(Default)]
struct Sentinels {
    air: Option<Arc<BlockDefinition>>,
    water: Option<Arc<BlockDefinition>>,
    command_block: Option<Arc<BlockDefinition>>,
    moving_block: Option<Arc<BlockDefinition>>,
}

impl Sentinels {
    fn observe(&mut self, java_identifier: &str, definition: &Arc<BlockDefinition>) {
        let slot = match java_identifier {
            AIR_STATE => &mut self.air,
            WATER_STATE => &mut self.water,
            COMMAND_BLOCK_STATE => &mut self.command_block,
            MOVING_PISTON_STATE => &mut self.moving_block,
            _ => return,
        };
        *slot = Some(Arc::clone(definition));
    }
}

fn require(
    protocol: u32,
    sentinel: &'static str,
    slot: Option<Arc<BlockDefinition>>,
) -> Result<Arc<BlockDefinition>, RegistryError> {
    slot.ok_or(RegistryError::SentinelNotFound { protocol, sentinel })
}

/// Block translation tables for one protocol version. Immutable once built.
#[derive(Debug)]
pub struct BlockMappings {
    protocol: u32,
    label: String,
    block_state_version: i32,
    java_to_bedrock: Vec<Arc<BlockDefinition>>,
    definition_registry: BlockDefinitionRegistry,
    air: Arc<BlockDefinition>,
    water: Arc<BlockDefinition>,
    command_block: Arc<BlockDefinition>,
    moving_block: Arc<BlockDefinition>,
    waterlogged: HashSet<u32>,
    jigsaw_definitions: HashSet<Arc<BlockDefinition>>,
    flower_pot_blocks: HashMap<Arc<str>, NbtCompound>,
    item_frames: HashMap<CanonicalKey, Arc<BlockDefinition>>,
    palette: Vec<NbtCompound>,
}

impl BlockMappings {
    /// Resolve every source state against one protocol's palette.
    ///
    /// Source states are visited in numeric id order. A state with no palette
    /// entry, or a sentinel never seen, fails the whole version.
    pub fn build(
        source: &SourceBlockRegistry,
        version: PaletteVersion,
    ) -> Result<Self, RegistryError> {
        let PaletteVersion {
            protocol,
            label,
            quirks,
            palette,
        } = version;
        let index = PaletteIndex::build(protocol, &palette)?;
        let block_state_version = index.block_state_version();

        let mut java_to_bedrock = Vec::with_capacity(source.len());
        let mut sentinels = Sentinels::default();
        let mut waterlogged = HashSet::new();
        let mut jigsaw_definitions = HashSet::new();
        let mut flower_pot_blocks = HashMap::new();

        for state in source.states() {
            let key = compose_key(state, block_state_version, &quirks);
            let definition = index.lookup(&key).ok_or_else(|| {
                RegistryError::UnresolvedBlockState {
                    protocol,
                    java_identifier: state.java_identifier.clone(),
                    key: key.to_string(),
                }
            })?;

            sentinels.observe(&state.java_identifier, definition);

            if state.java_identifier.contains("jigsaw") {
                jigsaw_definitions.insert(Arc::clone(definition));
            }
            if is_waterlogged_state(&state.java_identifier) {
                waterlogged.insert(state.java_id);
            }
            // The potted variant is found by palette position, not by key.
            if state.pottable {
                flower_pot_blocks.insert(
                    Arc::clone(&state.clean_identifier),
                    palette[definition.runtime_id as usize].clone(),
                );
            }

            java_to_bedrock.push(Arc::clone(definition));
        }

        let air = require(protocol, "air", sentinels.air)?;
        let water = require(protocol, "water", sentinels.water)?;
        let command_block = require(protocol, "command block", sentinels.command_block)?;
        let moving_block = require(protocol, "moving block", sentinels.moving_block)?;

        let item_frames = index
            .definitions()
            .iter()
            .filter(|def| ITEM_FRAMES.contains(&def.identifier.as_str()))
            .map(|def| (def.key.clone(), Arc::clone(def)))
            .collect();

        let definition_registry = BlockDefinitionRegistry::from_definitions(&java_to_bedrock);

        info!(
            "Built block mappings for protocol {protocol} ({label}): {} source states -> {} of {} palette entries",
            java_to_bedrock.len(),
            definition_registry.len(),
            index.len()
        );

        Ok(Self {
            protocol,
            label,
            block_state_version,
            java_to_bedrock,
            definition_registry,
            air,
            water,
            command_block,
            moving_block,
            waterlogged,
            jigsaw_definitions,
            flower_pot_blocks,
            item_frames,
            palette,
        })
    }

    pub fn protocol(&self) -> u32 {
        self.protocol
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn block_state_version(&self) -> i32 {
        self.block_state_version
    }

    /// Definition for a source state id; air for ids outside the table.
    pub fn bedrock_block(&self, java_id: u32) -> &Arc<BlockDefinition> {
        self.java_to_bedrock
            .get(java_id as usize)
            .unwrap_or(&self.air)
    }

    /// Full source id -> definition table.
    pub fn java_to_bedrock(&self) -> &[Arc<BlockDefinition>] {
        &self.java_to_bedrock
    }

    pub fn definition_registry(&self) -> &BlockDefinitionRegistry {
        &self.definition_registry
    }

    pub fn bedrock_air(&self) -> &Arc<BlockDefinition> {
        &self.air
    }

    pub fn bedrock_water(&self) -> &Arc<BlockDefinition> {
        &self.water
    }

    pub fn command_block(&self) -> &Arc<BlockDefinition> {
        &self.command_block
    }

    pub fn bedrock_moving_block(&self) -> &Arc<BlockDefinition> {
        &self.moving_block
    }

    pub fn is_waterlogged(&self, java_id: u32) -> bool {
        self.waterlogged.contains(&java_id)
    }

    pub fn waterlogged(&self) -> &HashSet<u32> {
        &self.waterlogged
    }

    pub fn is_jigsaw(&self, definition: &BlockDefinition) -> bool {
        self.jigsaw_definitions.contains(definition)
    }

    pub fn jigsaw_definitions(&self) -> &HashSet<Arc<BlockDefinition>> {
        &self.jigsaw_definitions
    }

    /// Raw palette compound of the potted variant, by clean source identifier.
    pub fn flower_pot_block(&self, clean_identifier: &str) -> Option<&NbtCompound> {
        self.flower_pot_blocks.get(clean_identifier)
    }

    pub fn flower_pot_blocks(&self) -> &HashMap<Arc<str>, NbtCompound> {
        &self.flower_pot_blocks
    }

    pub fn item_frame(&self, key: &CanonicalKey) -> Option<&Arc<BlockDefinition>> {
        self.item_frames.get(key)
    }

    pub fn is_item_frame(&self, definition: &BlockDefinition) -> bool {
        self.item_frames
            .get(&definition.key)
            .is_some_and(|frame| **frame == *definition)
    }

    pub fn item_frames(&self) -> &HashMap<CanonicalKey, Arc<BlockDefinition>> {
        &self.item_frames
    }

    /// The palette exactly as decoded.
    pub fn palette(&self) -> &[NbtCompound] {
        &self.palette
    }
}

/// Protocol version -> block mappings. Each protocol is inserted once.
#[derive(Debug, Default)]
pub struct BlockRegistries {
    versions: BTreeMap<u32, Arc<BlockMappings>>,
}

impl BlockRegistries {
    /// Build every protocol version in parallel, then publish all of them.
    /// Nothing is published if any version fails.
    pub fn build(
        source: &SourceBlockRegistry,
        versions: Vec<PaletteVersion>,
    ) -> Result<Self, RegistryError> {
        if versions.is_empty() {
            return Err(RegistryError::MissingAsset("no block palettes configured".into()));
        }
        let built = versions
            .into_par_iter()
            .map(|version| BlockMappings::build(source, version))
            .collect::<Result<Vec<_>, _>>()?;

        let mut registries = Self::default();
        for mappings in built {
            registries.register(mappings)?;
        }
        Ok(registries)
    }

    pub fn register(&mut self, mappings: BlockMappings) -> Result<(), RegistryError> {
        let protocol = mappings.protocol();
        if self.versions.contains_key(&protocol) {
            return Err(RegistryError::DuplicateProtocolVersion(protocol));
        }
        self.versions.insert(protocol, Arc::new(mappings));
        Ok(())
    }

    pub fn get(&self, protocol: u32) -> Option<&Arc<BlockMappings>> {
        self.versions.get(&protocol)
    }

    /// Mappings of the highest registered protocol.
    pub fn latest(&self) -> Option<&Arc<BlockMappings>> {
        self.versions.values().next_back()
    }

    /// Registered protocols, ascending.
    pub fn protocols(&self) -> impl Iterator<Item = u32> + '_ {
        self.versions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
