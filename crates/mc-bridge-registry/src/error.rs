//! Registry build errors.
//!
//! Every variant is fatal: a registry that failed to build is never published.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("malformed entry {identifier}: {reason}")]
    MalformedEntry { identifier: String, reason: String },

    #[error("duplicate block state in palette for protocol {protocol}: {key}")]
    PaletteAmbiguity { protocol: u32, key: String },

    #[error("unable to find {java_identifier} in palette for protocol {protocol}; built key: {key}")]
    UnresolvedBlockState {
        protocol: u32,
        java_identifier: String,
        key: String,
    },

    #[error("unable to find {sentinel} in palette for protocol {protocol}")]
    SentinelNotFound {
        protocol: u32,
        sentinel: &'static str,
    },

    #[error("block mappings for protocol {0} registered twice")]
    DuplicateProtocolVersion(u32),

    #[error("unknown identifier {identifier} in {context}")]
    UnknownIdentifier {
        context: &'static str,
        identifier: String,
    },
}

impl RegistryError {
    pub(crate) fn malformed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::MalformedEntry {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}
