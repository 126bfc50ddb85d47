//! Target-edition block and item definitions.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use mc_bridge_nbt::NbtCompound;

use crate::state::CanonicalKey;

/// A block state from one protocol version's palette.
///
/// Identity is `(runtime_id, identifier)`: within one palette the runtime id is
/// unique, so two definitions compare equal only if they are the same entry.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    /// Position in the decoded palette.
    pub runtime_id: u32,
    pub identifier: String,
    pub key: CanonicalKey,
    /// Palette compound with decoration fields removed.
    pub tag: NbtCompound,
}

impl PartialEq for BlockDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.runtime_id == other.runtime_id && self.identifier == other.identifier
    }
}

impl Eq for BlockDefinition {}

impl Hash for BlockDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.runtime_id.hash(state);
        self.identifier.hash(state);
    }
}

impl fmt::Display for BlockDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.identifier, self.runtime_id)
    }
}

/// Compact registry of the block definitions a protocol version can send.
///
/// Only definitions reachable from some source state are registered.
#[derive(Debug, Clone, Default)]
pub struct BlockDefinitionRegistry {
    definitions: Vec<Arc<BlockDefinition>>,
    by_runtime_id: HashMap<u32, Arc<BlockDefinition>>,
}

impl BlockDefinitionRegistry {
    /// Register definitions, keeping the first occurrence of each.
    pub fn from_definitions<'a>(
        definitions: impl IntoIterator<Item = &'a Arc<BlockDefinition>>,
    ) -> Self {
        let mut registry = Self::default();
        for definition in definitions {
            if registry.by_runtime_id.contains_key(&definition.runtime_id) {
                continue;
            }
            registry
                .by_runtime_id
                .insert(definition.runtime_id, Arc::clone(definition));
            registry.definitions.push(Arc::clone(definition));
        }
        registry
    }

    pub fn get(&self, runtime_id: u32) -> Option<&Arc<BlockDefinition>> {
        self.by_runtime_id.get(&runtime_id)
    }

    /// Registered definitions in order of first occurrence.
    pub fn definitions(&self) -> &[Arc<BlockDefinition>] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A target-edition item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDefinition {
    pub runtime_id: i32,
    pub identifier: String,
    pub component_based: bool,
}

impl ItemDefinition {
    pub const AIR_IDENTIFIER: &'static str = "minecraft:air";

    /// The empty-hand item.
    pub fn air() -> Self {
        Self {
            runtime_id: 0,
            identifier: Self::AIR_IDENTIFIER.to_owned(),
            component_based: false,
        }
    }

    pub fn is_air(&self) -> bool {
        self.runtime_id == 0 && self.identifier == Self::AIR_IDENTIFIER
    }
}

impl fmt::Display for ItemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.identifier, self.runtime_id)
    }
}
