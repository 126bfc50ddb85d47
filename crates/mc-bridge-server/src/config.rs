use std::path::{Path, PathBuf};

use mc_bridge_registry::QuirkRule;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BridgeConfig {
    pub logging: LoggingSection,
    #[serde(default)]
    pub assets: AssetsSection,
    #[serde(default)]
    pub palettes: Vec<PaletteSection>,
    /// Protocol the item registry resolves placed blocks against.
    /// Defaults to the highest configured protocol.
    #[serde(default)]
    pub canonical_protocol: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetsSection {
    #[serde(default = "default_blocks")]
    pub blocks: PathBuf,
    #[serde(default = "default_items")]
    pub items: PathBuf,
    #[serde(default = "default_item_definitions")]
    pub item_definitions: PathBuf,
    #[serde(default = "default_creative_items")]
    pub creative_items: PathBuf,
    #[serde(default = "default_interactions")]
    pub interactions: PathBuf,
}

fn default_blocks() -> PathBuf {
    "mappings/blocks.json".into()
}

fn default_items() -> PathBuf {
    "mappings/items.json".into()
}

fn default_item_definitions() -> PathBuf {
    "bedrock/item_definitions.json".into()
}

fn default_creative_items() -> PathBuf {
    "bedrock/creative_items.json".into()
}

fn default_interactions() -> PathBuf {
    "mappings/interactions.json".into()
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            blocks: default_blocks(),
            items: default_items(),
            item_definitions: default_item_definitions(),
            creative_items: default_creative_items(),
            interactions: default_interactions(),
        }
    }
}

/// How a palette file is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteEncoding {
    /// Big-endian root compound with a `blocks` list. Usually gzip'd.
    #[default]
    BigEndian,
    /// Little-endian root compound with a `blocks` list.
    LittleEndian,
    /// Back-to-back network roots, one per block state.
    NetworkStream,
}

/// One supported target protocol version.
#[derive(Debug, Deserialize)]
pub struct PaletteSection {
    pub protocol: u32,
    pub label: String,
    pub path: PathBuf,
    #[serde(default)]
    pub encoding: PaletteEncoding,
    /// Appended after the built-in rules for this protocol.
    #[serde(default)]
    pub quirks: Vec<QuirkRule>,
}

impl BridgeConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_bridge_registry::StateValue;

    #[test]
    fn parse_minimal_config() {
        let toml_str = r#"
            [logging]
            level = "info"
        "#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "info");
        // assets section defaults when absent
        assert_eq!(config.assets.blocks, PathBuf::from("mappings/blocks.json"));
        assert_eq!(
            config.assets.item_definitions,
            PathBuf::from("bedrock/item_definitions.json")
        );
        assert!(config.palettes.is_empty());
        assert_eq!(config.canonical_protocol, None);
    }

    #[test]
    fn parse_palettes_with_quirks() {
        let toml_str = r#"
            canonical_protocol = 527

            [logging]
            level = "debug"

            [assets]
            blocks = "data/blocks.json"

            [[palettes]]
            protocol = 527
            label = "1_19_0"
            path = "bedrock/block_palette.1_19_0.nbt"

            [[palettes]]
            protocol = 544
            label = "1_19_20"
            path = "bedrock/canonical_block_states.1_19_20.nbt"
            encoding = "network_stream"

            [[palettes.quirks]]
            kind = "alter_property"
            identifier = "minecraft:lit_pumpkin"
            property = "direction"
            value = 0
        "#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.canonical_protocol, Some(527));
        assert_eq!(config.assets.blocks, PathBuf::from("data/blocks.json"));
        assert_eq!(config.assets.items, PathBuf::from("mappings/items.json"));

        assert_eq!(config.palettes.len(), 2);
        assert_eq!(config.palettes[0].encoding, PaletteEncoding::BigEndian);
        assert!(config.palettes[0].quirks.is_empty());
        assert_eq!(config.palettes[1].encoding, PaletteEncoding::NetworkStream);
        assert_eq!(
            config.palettes[1].quirks,
            vec![QuirkRule::AlterProperty {
                identifier: "minecraft:lit_pumpkin".into(),
                property: "direction".into(),
                value: StateValue::Int(0),
            }]
        );
    }

    #[test]
    fn logging_level_is_required() {
        assert!(toml::from_str::<BridgeConfig>("").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(BridgeConfig::load(&path).unwrap().logging.level, "warn");
        assert!(BridgeConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
