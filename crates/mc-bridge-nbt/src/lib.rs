//! NBT (Named Binary Tag) model and codecs.
//!
//! Supports three variants:
//! - **Big-endian**: Java-style files; the block palettes shipped as assets use it.
//! - **Standard LE**: Bedrock disk storage. Ints are i32_le, string lengths are u16_le.
//! - **Network**: Ints are ZigZag VarInt, longs VarLong, string lengths VarUInt32.
//!   Canonical state dumps are a stream of network roots.

mod be;
pub mod error;
mod io;
mod le;
mod network;
pub mod tag;

pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut};

/// Read big-endian NBT from a buffer.
pub fn read_nbt_be(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt::<be::BeVariant>(buf)
}

/// Write big-endian NBT to a buffer.
pub fn write_nbt_be(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt::<be::BeVariant>(buf, root)
}

/// Read standard little-endian NBT from a buffer.
pub fn read_nbt_le(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt::<le::LeVariant>(buf)
}

/// Write standard little-endian NBT to a buffer.
pub fn write_nbt_le(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt::<le::LeVariant>(buf, root)
}

/// Read network NBT (VarInt variant) from a buffer.
pub fn read_nbt_network(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt::<network::NetworkVariant>(buf)
}

/// Read consecutive network NBT roots until the buffer is empty.
pub fn read_nbt_network_stream(buf: &mut impl Buf) -> Result<Vec<NbtRoot>, NbtError> {
    io::read_nbt_stream::<network::NetworkVariant>(buf)
}

/// Write network NBT (VarInt variant) to a buffer.
pub fn write_nbt_network(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt::<network::NetworkVariant>(buf, root)
}
