//! Source block id sets consulted by the interaction permission check.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::source_blocks::SourceBlockRegistry;

/// `interactions.json`: two lists of full source block identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInteractions {
    pub always_consumes: Vec<String>,
    pub requires_may_build: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionSets {
    always_consumes: HashSet<u32>,
    requires_may_build: HashSet<u32>,
}

impl InteractionSets {
    pub fn build(raw: &RawInteractions, blocks: &SourceBlockRegistry) -> Result<Self, RegistryError> {
        Ok(Self {
            always_consumes: resolve(&raw.always_consumes, blocks, "always_consumes")?,
            requires_may_build: resolve(&raw.requires_may_build, blocks, "requires_may_build")?,
        })
    }

    /// Interacting with this block always uses the held item.
    pub fn always_consumes(&self, java_id: u32) -> bool {
        self.always_consumes.contains(&java_id)
    }

    /// Interacting with this block needs build permission.
    pub fn requires_may_build(&self, java_id: u32) -> bool {
        self.requires_may_build.contains(&java_id)
    }

    pub fn always_consumes_ids(&self) -> &HashSet<u32> {
        &self.always_consumes
    }

    pub fn requires_may_build_ids(&self) -> &HashSet<u32> {
        &self.requires_may_build
    }
}

fn resolve(
    identifiers: &[String],
    blocks: &SourceBlockRegistry,
    context: &'static str,
) -> Result<HashSet<u32>, RegistryError> {
    identifiers
        .iter()
        .map(|identifier| {
            blocks
                .java_id(identifier)
                .ok_or_else(|| RegistryError::UnknownIdentifier {
                    context,
                    identifier: identifier.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::source_blocks;
    use serde_json::json;

    #[test]
    fn identifiers_become_ids() {
        let blocks = source_blocks();
        let raw: RawInteractions = serde_json::from_value(json!({
            "always_consumes": ["minecraft:command_block[conditional=false,facing=north]"],
            "requires_may_build": ["minecraft:jigsaw[orientation=north_up]", "minecraft:stone"]
        }))
        .unwrap();
        let sets = InteractionSets::build(&raw, &blocks).unwrap();
        assert!(sets.always_consumes(3));
        assert!(!sets.always_consumes(2));
        assert!(sets.requires_may_build(9));
        assert!(sets.requires_may_build(2));
        assert_eq!(sets.requires_may_build_ids().len(), 2);
    }

    #[test]
    fn both_lists_are_required() {
        assert!(serde_json::from_str::<RawInteractions>("{}").is_err());
        assert!(serde_json::from_value::<RawInteractions>(json!({
            "always_consumes": ["minecraft:stone"]
        }))
        .is_err());

        let raw: RawInteractions = serde_json::from_value(json!({
            "always_consumes": [],
            "requires_may_build": []
        }))
        .unwrap();
        let sets = InteractionSets::build(&raw, &source_blocks()).unwrap();
        assert!(sets.always_consumes_ids().is_empty());
    }

    #[test]
    fn unknown_identifier_is_fatal() {
        let raw = RawInteractions {
            always_consumes: vec!["minecraft:stone[bogus=1]".into()],
            requires_may_build: Vec::new(),
        };
        match InteractionSets::build(&raw, &source_blocks()) {
            Err(RegistryError::UnknownIdentifier { context, identifier }) => {
                assert_eq!(context, "always_consumes");
                assert_eq!(identifier, "minecraft:stone[bogus=1]");
            }
            other => panic!("expected unknown identifier, got {other:?}"),
        }
    }
}
