//! Index of one protocol version's block palette by canonical key.

use std::collections::HashMap;
use std::sync::Arc;

use mc_bridge_nbt::NbtCompound;

use crate::definition::BlockDefinition;
use crate::error::RegistryError;
use crate::state::CanonicalKey;

/// Palette fields that vary between releases without changing the block state.
pub const DECORATION_FIELDS: [&str; 2] = ["name_hash", "network_id"];

/// Canonical key -> definition for one palette. Keys are unique.
#[derive(Debug, Clone)]
pub struct PaletteIndex {
    protocol: u32,
    block_state_version: i32,
    definitions: Vec<Arc<BlockDefinition>>,
    by_key: HashMap<CanonicalKey, Arc<BlockDefinition>>,
}

impl PaletteIndex {
    /// Index a decoded palette. Runtime ids are palette positions.
    ///
    /// The `version` of the first entry becomes the structural version that
    /// source keys for this protocol are composed with.
    pub fn build(protocol: u32, palette: &[NbtCompound]) -> Result<Self, RegistryError> {
        if palette.is_empty() {
            return Err(RegistryError::MissingAsset(format!(
                "block palette for protocol {protocol} is empty"
            )));
        }

        let mut definitions = Vec::with_capacity(palette.len());
        let mut by_key = HashMap::with_capacity(palette.len());
        let mut block_state_version = None;

        for (runtime_id, raw) in palette.iter().enumerate() {
            let mut tag = raw.clone();
            for field in DECORATION_FIELDS {
                tag.remove(field);
            }

            let key = CanonicalKey::from_palette_entry(&tag).map_err(|reason| {
                RegistryError::malformed(
                    format!("palette entry {runtime_id} (protocol {protocol})"),
                    reason,
                )
            })?;
            if by_key.contains_key(&key) {
                return Err(RegistryError::PaletteAmbiguity {
                    protocol,
                    key: key.to_string(),
                });
            }
            block_state_version.get_or_insert(key.version);

            let definition = Arc::new(BlockDefinition {
                runtime_id: runtime_id as u32,
                identifier: key.name.clone(),
                key: key.clone(),
                tag,
            });
            by_key.insert(key, Arc::clone(&definition));
            definitions.push(definition);
        }

        Ok(Self {
            protocol,
            // Non-empty palette, so the first entry set it.
            block_state_version: block_state_version.unwrap_or_default(),
            definitions,
            by_key,
        })
    }

    pub fn lookup(&self, key: &CanonicalKey) -> Option<&Arc<BlockDefinition>> {
        self.by_key.get(key)
    }

    pub fn protocol(&self) -> u32 {
        self.protocol
    }

    pub fn block_state_version(&self) -> i32 {
        self.block_state_version
    }

    /// Definitions in palette order.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{palette_entry, VERSION};
    use crate::state::{StateMap, StateValue};
    use mc_bridge_nbt::NbtTag;

    #[test]
    fn runtime_ids_are_positions() {
        let palette = vec![
            palette_entry("minecraft:air", &[]),
            palette_entry("minecraft:stone", &[]),
        ];
        let index = PaletteIndex::build(544, &palette).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.block_state_version(), VERSION);
        let key = CanonicalKey::new("minecraft:stone", VERSION, StateMap::new());
        assert_eq!(index.lookup(&key).unwrap().runtime_id, 1);
    }

    #[test]
    fn first_version_is_structural_version() {
        let mut odd = palette_entry("minecraft:stone", &[]);
        odd.insert("version".into(), NbtTag::Int(1));
        let palette = vec![palette_entry("minecraft:air", &[]), odd];
        let index = PaletteIndex::build(544, &palette).unwrap();
        assert_eq!(index.block_state_version(), VERSION);
    }

    #[test]
    fn decoration_is_stripped_before_keying() {
        let mut hashed = palette_entry("minecraft:water", &[("liquid_depth", NbtTag::Int(0))]);
        hashed.insert("name_hash".into(), NbtTag::Long(0x1234));
        hashed.insert("network_id".into(), NbtTag::Int(-77));
        let index = PaletteIndex::build(544, &[hashed.clone()]).unwrap();

        let mut states = StateMap::new();
        states.insert("liquid_depth".into(), StateValue::Int(0));
        let def = index
            .lookup(&CanonicalKey::new("minecraft:water", VERSION, states))
            .unwrap();
        assert!(!def.tag.contains_key("name_hash"));
        assert!(!def.tag.contains_key("network_id"));
    }

    #[test]
    fn identical_keys_fail_fast() {
        let mut first = palette_entry("minecraft:stone", &[]);
        first.insert("name_hash".into(), NbtTag::Long(1));
        let mut second = palette_entry("minecraft:stone", &[]);
        second.insert("name_hash".into(), NbtTag::Long(2));
        let palette = vec![palette_entry("minecraft:air", &[]), first, second];
        let err = PaletteIndex::build(544, &palette).unwrap_err();
        assert!(matches!(err, RegistryError::PaletteAmbiguity { protocol: 544, .. }));
    }

    #[test]
    fn empty_palette_is_missing_asset() {
        assert!(matches!(
            PaletteIndex::build(544, &[]),
            Err(RegistryError::MissingAsset(_))
        ));
    }

    #[test]
    fn entry_without_name_is_malformed() {
        let mut nameless = NbtCompound::new();
        nameless.insert("version".into(), NbtTag::Int(VERSION));
        assert!(matches!(
            PaletteIndex::build(544, &[nameless]),
            Err(RegistryError::MalformedEntry { .. })
        ));
    }
}
