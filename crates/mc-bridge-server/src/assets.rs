//! Reads the asset files named in the configuration into registry inputs.

use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use flate2::read::GzDecoder;
use mc_bridge_nbt::{NbtCompound, NbtError, NbtRoot, NbtTag};
use mc_bridge_registry::{PaletteVersion, QuirkTable, RegistryError, RegistryInputs};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{BridgeConfig, PaletteEncoding, PaletteSection};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Nbt { path: PathBuf, source: NbtError },

    #[error("unexpected palette layout in {}: {reason}", .path.display())]
    PaletteLayout { path: PathBuf, reason: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Read a file, inflating it first if it is gzip'd.
pub fn read_asset(path: &Path) -> Result<Bytes, AssetError> {
    let io_err = |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let raw = std::fs::read(path).map_err(io_err)?;
    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(Bytes::from(raw));
    }
    let mut inflated = Vec::new();
    GzDecoder::new(raw.as_slice())
        .read_to_end(&mut inflated)
        .map_err(io_err)?;
    debug!(
        "Inflated {} ({} -> {} bytes)",
        path.display(),
        raw.len(),
        inflated.len()
    );
    Ok(Bytes::from(inflated))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let bytes = read_asset(path)?;
    serde_json::from_slice(&bytes).map_err(|source| AssetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode one palette file into its ordered block state compounds.
pub fn read_palette(
    path: &Path,
    encoding: PaletteEncoding,
) -> Result<Vec<NbtCompound>, AssetError> {
    let mut bytes = read_asset(path)?;
    let nbt_err = |source| AssetError::Nbt {
        path: path.to_path_buf(),
        source,
    };

    match encoding {
        PaletteEncoding::BigEndian => {
            let root = mc_bridge_nbt::read_nbt_be(&mut bytes).map_err(nbt_err)?;
            blocks_list(path, root)
        }
        PaletteEncoding::LittleEndian => {
            let root = mc_bridge_nbt::read_nbt_le(&mut bytes).map_err(nbt_err)?;
            blocks_list(path, root)
        }
        PaletteEncoding::NetworkStream => {
            let roots = mc_bridge_nbt::read_nbt_network_stream(&mut bytes).map_err(nbt_err)?;
            Ok(roots.into_iter().map(NbtRoot::into_compound).collect())
        }
    }
}

fn blocks_list(path: &Path, root: NbtRoot) -> Result<Vec<NbtCompound>, AssetError> {
    let layout_err = |reason: String| AssetError::PaletteLayout {
        path: path.to_path_buf(),
        reason,
    };
    let blocks = root
        .into_compound()
        .remove("blocks")
        .ok_or_else(|| layout_err("root has no `blocks` field".into()))?;
    let type_name = blocks.type_name();
    let entries = blocks
        .into_list()
        .ok_or_else(|| layout_err(format!("`blocks` is a {type_name}, not a list")))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            NbtTag::Compound(compound) => Ok(compound),
            other => Err(layout_err(format!(
                "`blocks[{i}]` is a {}, not a compound",
                other.type_name()
            ))),
        })
        .collect()
}

pub fn load_palette(section: &PaletteSection) -> Result<PaletteVersion, AssetError> {
    let palette = read_palette(&section.path, section.encoding)?;
    let quirks = QuirkTable::builtin(section.protocol).extended(section.quirks.iter().cloned());
    info!(
        "Loaded palette for protocol {} ({}): {} entries, {} quirk rule(s)",
        section.protocol,
        section.label,
        palette.len(),
        quirks.rules().len()
    );
    Ok(PaletteVersion {
        protocol: section.protocol,
        label: section.label.clone(),
        quirks,
        palette,
    })
}

/// Read every configured asset.
pub fn load_inputs(config: &BridgeConfig) -> Result<RegistryInputs, AssetError> {
    let assets = &config.assets;
    let palettes = config
        .palettes
        .iter()
        .map(load_palette)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RegistryInputs {
        blocks: read_json(&assets.blocks)?,
        palettes,
        canonical_protocol: config.canonical_protocol,
        items: read_json(&assets.items)?,
        item_definitions: read_json(&assets.item_definitions)?,
        creative_items: read_json(&assets.creative_items)?,
        interactions: read_json(&assets.interactions)?,
    })
}
