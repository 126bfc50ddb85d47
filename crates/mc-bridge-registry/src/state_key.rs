//! Composes the canonical key of a source block state for one protocol version.

use crate::quirks::QuirkTable;
use crate::source_blocks::SourceBlockState;
use crate::state::CanonicalKey;

/// Build the key a source state must have in the palette of a protocol whose
/// structural version is `block_state_version` and whose quirks are `quirks`.
pub fn compose_key(
    state: &SourceBlockState,
    block_state_version: i32,
    quirks: &QuirkTable,
) -> CanonicalKey {
    let mut name = state.bedrock_identifier.clone();
    let mut states = state.bedrock_states.clone();
    quirks.apply(&mut name, &mut states);
    CanonicalKey::new(name, block_state_version, states)
}
