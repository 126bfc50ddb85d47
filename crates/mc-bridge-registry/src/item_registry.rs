//! Builds [`ItemMappings`] from the source item description.
//!
//! Items are single-version: placed blocks are resolved against one chosen
//! protocol's block mappings.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};

use crate::block_registry::BlockMappings;
use crate::definition::ItemDefinition;
use crate::error::RegistryError;
use crate::item_mappings::{ItemMapping, ItemMappings};
use crate::stored_items::StoredItemMappings;

pub const DEFAULT_STACK_SIZE: u32 = 64;

const LODESTONE_COMPASS: &str = "minecraft:lodestone_compass";

/// Parsed source item description: `java_identifier -> entry`, in id order.
pub type RawItemTable = IndexMap<String, RawItemEntry>;

/// One entry of `items.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItemEntry {
    /// Absent for items the target edition does not have.
    pub bedrock_identifier: Option<String>,
    /// Target item shown in place of a java-only item.
    pub substitute_identifier: Option<String>,
    #[serde(default)]
    pub bedrock_data: i32,
    /// Source block id of the block this item places.
    pub block_runtime_id: Option<u32>,
    pub pick_item: Option<String>,
    pub stack_size: Option<u32>,
}

/// One target item, as listed in the target edition's item table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    pub name: String,
    pub id: i32,
    #[serde(default)]
    pub component_based: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemGroup {
    Bucket,
    Boat,
    SpawnEgg,
    Carpet,
}

impl ItemGroup {
    fn of(java_identifier: &str) -> Option<Self> {
        if java_identifier.ends_with("_bucket") && java_identifier != "minecraft:milk_bucket" {
            Some(ItemGroup::Bucket)
        } else if java_identifier.ends_with("_boat") || java_identifier.ends_with("_raft") {
            Some(ItemGroup::Boat)
        } else if java_identifier.ends_with("_spawn_egg") {
            Some(ItemGroup::SpawnEgg)
        } else if java_identifier.ends_with("_carpet") && java_identifier != "minecraft:moss_carpet"
        {
            Some(ItemGroup::Carpet)
        } else {
            None
        }
    }
}

struct DefinitionTable {
    ordered: Vec<Arc<ItemDefinition>>,
    by_name: HashMap<String, Arc<ItemDefinition>>,
    by_runtime_id: HashMap<i32, Arc<ItemDefinition>>,
}

impl DefinitionTable {
    fn build(raw: &[RawItemDefinition]) -> Result<Self, RegistryError> {
        let mut ordered = Vec::with_capacity(raw.len());
        let mut by_name = HashMap::with_capacity(raw.len() + 1);
        let mut by_runtime_id = HashMap::with_capacity(raw.len() + 1);

        for entry in raw {
            let definition = Arc::new(ItemDefinition {
                runtime_id: entry.id,
                identifier: entry.name.clone(),
                component_based: entry.component_based,
            });
            if by_name
                .insert(entry.name.clone(), Arc::clone(&definition))
                .is_some()
            {
                return Err(RegistryError::malformed(
                    entry.name.as_str(),
                    "item definition listed twice",
                ));
            }
            by_runtime_id.insert(entry.id, Arc::clone(&definition));
            ordered.push(definition);
        }

        // Air is implicit in the target item table.
        let air = Arc::new(ItemDefinition::air());
        by_name
            .entry(ItemDefinition::AIR_IDENTIFIER.to_owned())
            .or_insert_with(|| Arc::clone(&air));
        by_runtime_id.entry(air.runtime_id).or_insert(air);

        Ok(Self {
            ordered,
            by_name,
            by_runtime_id,
        })
    }

    fn get(
        &self,
        identifier: &str,
        context: &'static str,
    ) -> Result<Arc<ItemDefinition>, RegistryError> {
        self.by_name
            .get(identifier)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownIdentifier {
                context,
                identifier: identifier.to_owned(),
            })
    }
}

/// Build the item registry.
///
/// `blocks` is the protocol version whose block definitions placed blocks
/// resolve to.
pub fn build_item_mappings(
    items: &RawItemTable,
    definitions: &[RawItemDefinition],
    creative_items: &[String],
    blocks: &BlockMappings,
) -> Result<ItemMappings, RegistryError> {
    if items.is_empty() {
        return Err(RegistryError::MissingAsset(
            "source item description is empty".into(),
        ));
    }
    let table = DefinitionTable::build(definitions)?;
    let air = table.get(ItemDefinition::AIR_IDENTIFIER, "item definitions")?;

    let mut mappings = Vec::with_capacity(items.len());
    let mut first_index: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    let mut java_only_items = HashSet::new();
    let (mut buckets, mut boats, mut spawn_eggs, mut carpets) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new());

    for (index, (java_identifier, entry)) in items.iter().enumerate() {
        let java_only = entry.bedrock_identifier.is_none();
        let bedrock_definition = match (&entry.bedrock_identifier, &entry.substitute_identifier) {
            (Some(name), _) => table.get(name, "item definitions")?,
            (None, Some(substitute)) => table.get(substitute, "item substitutes")?,
            (None, None) => Arc::clone(&air),
        };

        let bedrock_block_definition = entry
            .block_runtime_id
            .map(|block_id| {
                blocks
                    .java_to_bedrock()
                    .get(block_id as usize)
                    .cloned()
                    .ok_or_else(|| {
                        RegistryError::malformed(
                            java_identifier.as_str(),
                            format!("block_runtime_id {block_id} is not a source block"),
                        )
                    })
            })
            .transpose()?;

        if java_only {
            java_only_items.insert(java_identifier.clone());
        }
        match ItemGroup::of(java_identifier) {
            Some(ItemGroup::Bucket) => buckets.push(index),
            Some(ItemGroup::Boat) => boats.push(index),
            Some(ItemGroup::SpawnEgg) => spawn_eggs.push(index),
            Some(ItemGroup::Carpet) => carpets.push(index),
            None => {}
        }
        first_index.entry(java_identifier.as_str()).or_insert(index);

        mappings.push(ItemMapping {
            java_identifier: java_identifier.clone(),
            java_id: index as i32,
            bedrock_definition,
            bedrock_block_definition,
            bedrock_data: entry.bedrock_data,
            pick_item: entry.pick_item.clone(),
            stack_size: entry.stack_size.unwrap_or(DEFAULT_STACK_SIZE),
            java_only,
        });
    }

    let creative = creative_items
        .iter()
        .map(|identifier| {
            first_index
                .get(identifier.as_str())
                .copied()
                .ok_or_else(|| RegistryError::UnknownIdentifier {
                    context: "creative items",
                    identifier: identifier.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stored_items = StoredItemMappings::resolve(|identifier: &str| {
        first_index
            .get(identifier)
            .and_then(|&index| mappings.get(index))
    })?;

    // Java has no lodestone compass item; it shares the compass id.
    let lodestone_compass = match table.by_name.get(LODESTONE_COMPASS) {
        Some(definition) => Some(ItemMapping {
            java_identifier: LODESTONE_COMPASS.to_owned(),
            java_id: stored_items.compass.java_id,
            bedrock_definition: Arc::clone(definition),
            bedrock_block_definition: None,
            bedrock_data: 0,
            pick_item: None,
            stack_size: stored_items.compass.stack_size,
            java_only: false,
        }),
        None => {
            warn!("Lodestone compass not found in item definitions");
            None
        }
    };

    info!(
        "Built item mappings against protocol {}: {} items ({} java-only), {} creative entries",
        blocks.protocol(),
        mappings.len(),
        java_only_items.len(),
        creative.len()
    );

    let DefinitionTable {
        ordered,
        by_name,
        by_runtime_id,
    } = table;

    Ok(ItemMappings {
        items: mappings,
        air: ItemMapping::air(),
        lodestone_compass,
        item_definitions: ordered,
        definitions_by_runtime_id: by_runtime_id,
        definitions_by_name: by_name,
        java_only_items,
        creative_items: creative,
        buckets,
        boats,
        spawn_eggs,
        carpets,
        stored_items,
        cached_java_mappings: DashMap::new(),
    })
}
