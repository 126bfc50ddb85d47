//! Cross-edition block and item registries.
//!
//! Source-edition (Java) block states and items are matched against the
//! target-edition (Bedrock) palettes of every supported protocol version at
//! startup. The result is an immutable [`Registries`] value queried by packet
//! translators.

pub mod block_registry;
pub mod definition;
pub mod error;
pub mod interactions;
pub mod item_mappings;
pub mod item_registry;
pub mod palette;
pub mod quirks;
pub mod registries;
pub mod source_blocks;
pub mod state;
pub mod state_key;
pub mod stored_items;

#[cfg(test)]
mod fixtures;

pub use block_registry::{BlockMappings, BlockRegistries, PaletteVersion};
pub use definition::{BlockDefinition, BlockDefinitionRegistry, ItemDefinition};
pub use error::RegistryError;
pub use item_mappings::{ItemMapping, ItemMappings};
pub use quirks::{QuirkRule, QuirkTable};
pub use registries::{Registries, RegistryInputs};
pub use state::{CanonicalKey, StateMap, StateValue};
