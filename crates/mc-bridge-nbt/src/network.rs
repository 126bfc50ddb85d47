//! Network NBT variant (ZigZag VarInt ints, VarLong longs, VarUInt32 string lengths).
//!
//! Shorts, floats and doubles stay fixed-width little-endian.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::io::{ensure_remaining, NbtVariant};

const VARINT_MAX_BYTES: usize = 5;
const VARLONG_MAX_BYTES: usize = 10;

pub(crate) struct NetworkVariant;

impl NbtVariant for NetworkVariant {
    fn write_short(buf: &mut impl BufMut, value: i16) {
        buf.put_i16_le(value);
    }

    fn read_short(buf: &mut impl Buf) -> Result<i16, NbtError> {
        ensure_remaining(buf, 2)?;
        Ok(buf.get_i16_le())
    }

    fn write_int(buf: &mut impl BufMut, value: i32) {
        write_var(buf, ((value << 1) ^ (value >> 31)) as u32 as u64);
    }

    fn read_int(buf: &mut impl Buf) -> Result<i32, NbtError> {
        let raw = read_var(buf, VARINT_MAX_BYTES)? as u32;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    fn write_long(buf: &mut impl BufMut, value: i64) {
        write_var(buf, ((value << 1) ^ (value >> 63)) as u64);
    }

    fn read_long(buf: &mut impl Buf) -> Result<i64, NbtError> {
        let raw = read_var(buf, VARLONG_MAX_BYTES)?;
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    fn write_float(buf: &mut impl BufMut, value: f32) {
        buf.put_f32_le(value);
    }

    fn read_float(buf: &mut impl Buf) -> Result<f32, NbtError> {
        ensure_remaining(buf, 4)?;
        Ok(buf.get_f32_le())
    }

    fn write_double(buf: &mut impl BufMut, value: f64) {
        buf.put_f64_le(value);
    }

    fn read_double(buf: &mut impl Buf) -> Result<f64, NbtError> {
        ensure_remaining(buf, 8)?;
        Ok(buf.get_f64_le())
    }

    fn write_array_len(buf: &mut impl BufMut, len: i32) {
        Self::write_int(buf, len);
    }

    fn read_array_len(buf: &mut impl Buf) -> Result<i32, NbtError> {
        Self::read_int(buf)
    }

    fn write_string_len(buf: &mut impl BufMut, len: usize) {
        write_var(buf, len as u64);
    }

    fn read_string_len(buf: &mut impl Buf) -> Result<usize, NbtError> {
        Ok(read_var(buf, VARINT_MAX_BYTES)? as u32 as usize)
    }
}

/// Write unsigned LEB128.
fn write_var(buf: &mut impl BufMut, mut value: u64) {
    loop {
        if value & !0x7F == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & 0x7F | 0x80) as u8);
        value >>= 7;
    }
}

/// Read unsigned LEB128 of at most `max_bytes` bytes.
fn read_var(buf: &mut impl Buf, max_bytes: usize) -> Result<u64, NbtError> {
    let mut result: u64 = 0;
    for i in 0..max_bytes {
        ensure_remaining(buf, 1)?;
        let byte = buf.get_u8();
        result |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(NbtError::VarIntTooLong { max_bytes })
}
