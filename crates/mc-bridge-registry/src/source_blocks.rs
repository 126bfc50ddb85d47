//! Source-edition (Java) block states, in registration order.
//!
//! The numeric id of a state is its position in the source description, so
//! the description is read through an order-preserving map.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

use crate::error::RegistryError;
use crate::state::{StateMap, StateValue};

/// Parsed source block description: `java_identifier -> entry`, in id order.
pub type RawBlockTable = IndexMap<String, RawBlockEntry>;

/// One entry of the source block description as it appears in `blocks.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlockEntry {
    pub bedrock_identifier: Option<String>,
    pub bedrock_states: Option<serde_json::Map<String, serde_json::Value>>,
    pub block_hardness: Option<f32>,
    pub can_break_with_hand: Option<bool>,
    pub collision_index: Option<i32>,
    pub pick_item: Option<String>,
    pub piston_behavior: Option<String>,
    pub has_block_entity: Option<bool>,
    /// Presence flag; the value is not inspected.
    pub pottable: Option<serde_json::Value>,
}

/// How a block reacts to being pushed by a piston.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PistonBehavior {
    #[default]
    Normal,
    Block,
    Destroy,
    PushOnly,
    Ignore,
}

impl FromStr for PistonBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(PistonBehavior::Normal),
            "block" => Ok(PistonBehavior::Block),
            "destroy" => Ok(PistonBehavior::Destroy),
            "push_only" => Ok(PistonBehavior::PushOnly),
            "ignore" => Ok(PistonBehavior::Ignore),
            other => Err(format!("unknown piston behavior `{other}`")),
        }
    }
}

impl fmt::Display for PistonBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PistonBehavior::Normal => "normal",
            PistonBehavior::Block => "block",
            PistonBehavior::Destroy => "destroy",
            PistonBehavior::PushOnly => "push_only",
            PistonBehavior::Ignore => "ignore",
        })
    }
}

/// A single source block state and the attributes derived from its description.
#[derive(Debug, Clone)]
pub struct SourceBlockState {
    /// Full identifier, e.g. `minecraft:water[level=0]`.
    pub java_identifier: String,
    /// Position in registration order.
    pub java_id: u32,
    /// Identifier without the state suffix, e.g. `minecraft:water`.
    pub clean_identifier: Arc<str>,
    /// Dense id of the run of states sharing `clean_identifier`.
    pub java_block_id: u32,
    /// Target-edition name the state declares (before quirks).
    pub bedrock_identifier: String,
    /// Target-edition properties the state declares (before quirks).
    pub bedrock_states: StateMap,
    pub hardness: Option<f32>,
    pub can_break_with_hand: bool,
    pub collision_index: Option<i32>,
    pub pick_item: Option<Arc<str>>,
    pub piston_behavior: PistonBehavior,
    pub is_block_entity: bool,
    pub pottable: bool,
}

/// Strip the `[...]` state suffix from a block state identifier.
pub fn clean_identifier(java_identifier: &str) -> &str {
    match java_identifier.find('[') {
        Some(i) => &java_identifier[..i],
        None => java_identifier,
    }
}

/// Blocks that never move, whatever the description says.
fn forced_immovable(java_identifier: &str) -> bool {
    java_identifier == "minecraft:obsidian"
        || java_identifier == "minecraft:crying_obsidian"
        || java_identifier.starts_with("minecraft:respawn_anchor")
        || java_identifier.starts_with("minecraft:reinforced_deepslate")
}

/// Source ids other subsystems look up directly. Absent landmarks are not fatal
/// here; consumers decide whether they need them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLandmarks {
    /// Clean id of the bell.
    pub bell_block_id: Option<u32>,
    /// Clean id of the cobweb.
    pub cobweb_block_id: Option<u32>,
    pub furnace_id: Option<u32>,
    pub furnace_lit_id: Option<u32>,
    pub spawner_id: Option<u32>,
    pub water_id: Option<u32>,
    pub honey_block_id: Option<u32>,
    pub slime_block_id: Option<u32>,
}

impl SourceLandmarks {
    fn observe(&mut self, state: &SourceBlockState) {
        let id = &state.java_identifier;
        if id.starts_with("minecraft:bell[") {
            self.bell_block_id = Some(state.java_block_id);
        } else if id.contains("cobweb") {
            self.cobweb_block_id = Some(state.java_block_id);
        } else if id.starts_with("minecraft:furnace[facing=north") {
            if id.contains("lit=true") {
                self.furnace_lit_id = Some(state.java_id);
            } else {
                self.furnace_id = Some(state.java_id);
            }
        } else if id.starts_with("minecraft:spawner") {
            self.spawner_id = Some(state.java_id);
        } else if id == "minecraft:water[level=0]" {
            self.water_id = Some(state.java_id);
        } else if id == "minecraft:honey_block" {
            self.honey_block_id = Some(state.java_id);
        } else if id == "minecraft:slime_block" {
            self.slime_block_id = Some(state.java_id);
        }
    }

    /// Names of the landmarks the source list lacks.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("bell", self.bell_block_id),
            ("cobweb", self.cobweb_block_id),
            ("furnace", self.furnace_id),
            ("lit furnace", self.furnace_lit_id),
            ("spawner", self.spawner_id),
            ("water", self.water_id),
            ("honey block", self.honey_block_id),
            ("slime block", self.slime_block_id),
        ]
        .into_iter()
        .filter(|(_, id)| id.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// All source block states plus the lookups derived from them.
#[derive(Debug, Clone)]
pub struct SourceBlockRegistry {
    states: Vec<SourceBlockState>,
    java_identifiers: HashMap<String, u32>,
    clean_identifiers: Vec<Arc<str>>,
    java_to_bedrock_identifiers: HashMap<Arc<str>, String>,
    landmarks: SourceLandmarks,
}

impl SourceBlockRegistry {
    /// Build the table from the parsed description.
    pub fn from_raw(raw: &RawBlockTable) -> Result<Self, RegistryError> {
        if raw.is_empty() {
            return Err(RegistryError::MissingAsset(
                "source block description is empty".into(),
            ));
        }

        let mut states = Vec::with_capacity(raw.len());
        let mut java_identifiers = HashMap::with_capacity(raw.len());
        let mut clean_identifiers: Vec<Arc<str>> = Vec::new();
        let mut java_to_bedrock_identifiers = HashMap::new();
        let mut interned: HashMap<String, Arc<str>> = HashMap::new();
        let mut landmarks = SourceLandmarks::default();

        for (java_id, (java_identifier, entry)) in raw.iter().enumerate() {
            let java_id = java_id as u32;
            let clean = clean_identifier(java_identifier);
            let clean = match clean_identifiers.last() {
                Some(last) if &**last == clean => Arc::clone(last),
                _ => {
                    let fresh: Arc<str> = Arc::from(clean);
                    clean_identifiers.push(Arc::clone(&fresh));
                    fresh
                }
            };
            let java_block_id = (clean_identifiers.len() - 1) as u32;

            let pick_item = entry.pick_item.as_ref().map(|name| {
                Arc::clone(
                    interned
                        .entry(name.clone())
                        .or_insert_with(|| Arc::from(name.as_str())),
                )
            });

            let state = parse_state(
                java_identifier,
                java_id,
                clean,
                java_block_id,
                pick_item,
                entry,
            )?;

            java_to_bedrock_identifiers.insert(
                Arc::clone(&state.clean_identifier),
                state.bedrock_identifier.clone(),
            );
            java_identifiers.insert(java_identifier.clone(), java_id);
            landmarks.observe(&state);
            states.push(state);
        }

        let missing = landmarks.missing();
        if !missing.is_empty() {
            warn!("Source block list has no {}", missing.join(", "));
        }

        Ok(Self {
            states,
            java_identifiers,
            clean_identifiers,
            java_to_bedrock_identifiers,
            landmarks,
        })
    }

    /// States in ascending numeric id order.
    pub fn states(&self) -> &[SourceBlockState] {
        &self.states
    }

    pub fn get(&self, java_id: u32) -> Option<&SourceBlockState> {
        self.states.get(java_id as usize)
    }

    /// Numeric id of a full state identifier.
    pub fn java_id(&self, java_identifier: &str) -> Option<u32> {
        self.java_identifiers.get(java_identifier).copied()
    }

    /// One clean identifier per clean-id group, indexed by `java_block_id`.
    pub fn clean_identifiers(&self) -> &[Arc<str>] {
        &self.clean_identifiers
    }

    /// Clean source identifier -> declared target identifier.
    pub fn java_to_bedrock_identifiers(&self) -> &HashMap<Arc<str>, String> {
        &self.java_to_bedrock_identifiers
    }

    pub fn landmarks(&self) -> &SourceLandmarks {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn parse_state(
    java_identifier: &str,
    java_id: u32,
    clean_identifier: Arc<str>,
    java_block_id: u32,
    pick_item: Option<Arc<str>>,
    entry: &RawBlockEntry,
) -> Result<SourceBlockState, RegistryError> {
    let bedrock_identifier = entry
        .bedrock_identifier
        .clone()
        .ok_or_else(|| RegistryError::malformed(java_identifier, "missing bedrock_identifier"))?;

    let mut bedrock_states = StateMap::new();
    if let Some(declared) = &entry.bedrock_states {
        for (property, value) in declared {
            let value = StateValue::from_json(value).ok_or_else(|| {
                RegistryError::malformed(
                    java_identifier,
                    format!("bedrock state `{property}` has unsupported value {value}"),
                )
            })?;
            bedrock_states.insert(property.clone(), value);
        }
    }

    // Collision shapes only exist for blocks with a hardness.
    let collision_index = match entry.block_hardness {
        Some(_) => Some(entry.collision_index.ok_or_else(|| {
            RegistryError::malformed(java_identifier, "block_hardness without collision_index")
        })?),
        None => None,
    };

    let piston_behavior = if forced_immovable(java_identifier) {
        PistonBehavior::Block
    } else {
        match &entry.piston_behavior {
            Some(name) => name
                .parse::<PistonBehavior>()
                .map_err(|reason: String| RegistryError::malformed(java_identifier, reason))?,
            None => PistonBehavior::Normal,
        }
    };

    Ok(SourceBlockState {
        java_identifier: java_identifier.to_owned(),
        java_id,
        clean_identifier,
        java_block_id,
        bedrock_identifier,
        bedrock_states,
        hardness: entry.block_hardness,
        can_break_with_hand: entry.can_break_with_hand.unwrap_or(false),
        collision_index,
        pick_item,
        piston_behavior,
        is_block_entity: entry.has_block_entity.unwrap_or(false),
        pottable: entry.pottable.is_some(),
    })
}
