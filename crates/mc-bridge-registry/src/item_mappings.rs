//! Published item translation table and its lookups.
//!
//! Everything here is read-only after build except the identifier cache,
//! which only ever gains entries that a fresh scan would produce again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::definition::{BlockDefinition, ItemDefinition};
use crate::stored_items::StoredItemMappings;

/// Items whose damage value varies per stack, so it is not compared on
/// reverse lookup.
fn has_variable_damage(java_identifier: &str) -> bool {
    java_identifier.ends_with("potion")
        || matches!(
            java_identifier,
            "minecraft:arrow" | "minecraft:firework_star" | "minecraft:goat_horn"
        )
}

/// One source item and its target-edition form.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMapping {
    pub java_identifier: String,
    pub java_id: i32,
    pub bedrock_definition: Arc<ItemDefinition>,
    /// Block the item places, if any.
    pub bedrock_block_definition: Option<Arc<BlockDefinition>>,
    /// Aux value sent with the item.
    pub bedrock_data: i32,
    pub pick_item: Option<String>,
    pub stack_size: u32,
    /// No target-edition equivalent; never returned by reverse lookup.
    pub java_only: bool,
}

impl ItemMapping {
    pub fn air() -> Self {
        Self {
            java_identifier: ItemDefinition::AIR_IDENTIFIER.to_owned(),
            java_id: 0,
            bedrock_definition: Arc::new(ItemDefinition::air()),
            bedrock_block_definition: None,
            bedrock_data: 0,
            pick_item: None,
            stack_size: 64,
            java_only: false,
        }
    }

    pub fn is_air(&self) -> bool {
        self.java_identifier == ItemDefinition::AIR_IDENTIFIER
    }
}

/// The item registry: source id -> mapping, plus groupings and lookups.
#[derive(Debug)]
pub struct ItemMappings {
    pub(crate) items: Vec<ItemMapping>,
    pub(crate) air: ItemMapping,
    pub(crate) lodestone_compass: Option<ItemMapping>,
    pub(crate) item_definitions: Vec<Arc<ItemDefinition>>,
    pub(crate) definitions_by_runtime_id: HashMap<i32, Arc<ItemDefinition>>,
    pub(crate) definitions_by_name: HashMap<String, Arc<ItemDefinition>>,
    pub(crate) java_only_items: HashSet<String>,
    /// Indices into `items`.
    pub(crate) creative_items: Vec<usize>,
    pub(crate) buckets: Vec<usize>,
    pub(crate) boats: Vec<usize>,
    pub(crate) spawn_eggs: Vec<usize>,
    pub(crate) carpets: Vec<usize>,
    pub(crate) stored_items: StoredItemMappings,
    /// Identifier -> index into `items`. Hits only.
    pub(crate) cached_java_mappings: DashMap<String, usize>,
}

impl ItemMappings {
    /// Mapping for a source item id. Out-of-range ids, negative ones included,
    /// give the air mapping.
    pub fn by_java_id(&self, java_id: i32) -> &ItemMapping {
        usize::try_from(java_id)
            .ok()
            .and_then(|index| self.items.get(index))
            .unwrap_or(&self.air)
    }

    /// First mapping whose source identifier is `java_identifier`.
    ///
    /// Safe to call concurrently; two callers missing the cache at once both
    /// scan and store the same index.
    pub fn by_java_identifier(&self, java_identifier: &str) -> Option<&ItemMapping> {
        let cached = self
            .cached_java_mappings
            .get(java_identifier)
            .map(|entry| *entry);
        if let Some(index) = cached {
            return self.items.get(index);
        }

        let index = self
            .items
            .iter()
            .position(|mapping| mapping.java_identifier == java_identifier)?;
        self.cached_java_mappings
            .insert(java_identifier.to_owned(), index);
        self.items.get(index)
    }

    /// Reverse lookup from a target item, its aux value and, for a block
    /// placement, the placed block.
    ///
    /// Candidates are tried in source id order and the first one that fits
    /// wins. Returns the air mapping when none fits.
    pub fn by_bedrock_item(
        &self,
        definition: &ItemDefinition,
        damage: i32,
        block: Option<&BlockDefinition>,
    ) -> &ItemMapping {
        if definition.is_air() {
            return &self.air;
        }
        if let Some(lodestone) = &self.lodestone_compass {
            if *lodestone.bedrock_definition == *definition {
                return lodestone;
            }
        }

        let placement_without_damage = block.is_some() && damage == 0;
        let found = self.items.iter().find(|mapping| {
            if *mapping.bedrock_definition != *definition {
                return false;
            }
            let fits = if placement_without_damage {
                mapping.bedrock_block_definition.as_deref() == block
            } else {
                mapping.bedrock_data == damage || has_variable_damage(&mapping.java_identifier)
            };
            fits && !mapping.java_only
        });
        if let Some(mapping) = found {
            return mapping;
        }

        // Empty-hand clicks land here constantly.
        if definition.runtime_id != 0 && damage != 0 {
            debug!("Missing mapping for bedrock item {definition}:{damage}");
        }
        &self.air
    }

    pub fn air(&self) -> &ItemMapping {
        &self.air
    }

    /// All mappings, indexed by source id.
    pub fn items(&self) -> &[ItemMapping] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Target-only item with no source counterpart.
    pub fn lodestone_compass(&self) -> Option<&ItemMapping> {
        self.lodestone_compass.as_ref()
    }

    /// Target item definitions in input order.
    pub fn item_definitions(&self) -> &[Arc<ItemDefinition>] {
        &self.item_definitions
    }

    pub fn item_definition(&self, runtime_id: i32) -> Option<&Arc<ItemDefinition>> {
        self.definitions_by_runtime_id.get(&runtime_id)
    }

    pub fn item_definition_by_name(&self, identifier: &str) -> Option<&Arc<ItemDefinition>> {
        self.definitions_by_name.get(identifier)
    }

    pub fn java_only_items(&self) -> &HashSet<String> {
        &self.java_only_items
    }

    pub fn is_java_only(&self, java_identifier: &str) -> bool {
        self.java_only_items.contains(java_identifier)
    }

    pub fn stored_items(&self) -> &StoredItemMappings {
        &self.stored_items
    }

    /// Creative inventory contents, in menu order.
    pub fn creative_items(&self) -> impl Iterator<Item = &ItemMapping> + '_ {
        self.select(&self.creative_items)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &ItemMapping> + '_ {
        self.select(&self.buckets)
    }

    pub fn boats(&self) -> impl Iterator<Item = &ItemMapping> + '_ {
        self.select(&self.boats)
    }

    pub fn spawn_eggs(&self) -> impl Iterator<Item = &ItemMapping> + '_ {
        self.select(&self.spawn_eggs)
    }

    pub fn carpets(&self) -> impl Iterator<Item = &ItemMapping> + '_ {
        self.select(&self.carpets)
    }

    fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a ItemMapping> + 'a {
        indices.iter().filter_map(|&index| self.items.get(index))
    }
}
