//! Tag tree encoding shared by every NBT flavour.
//!
//! The flavours only disagree on how numbers and length prefixes look; the
//! tree walk lives here once.

use std::marker::PhantomData;

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::tag::{NbtCompound, NbtRoot, NbtTag};

const TAG_END: u8 = 0;
const TAG_BYTE: u8 = 1;
const TAG_SHORT: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_LONG: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_BYTE_ARRAY: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_LIST: u8 = 9;
const TAG_COMPOUND: u8 = 10;
const TAG_INT_ARRAY: u8 = 11;
const TAG_LONG_ARRAY: u8 = 12;

/// Compounds and lists deeper than this are rejected.
const MAX_DEPTH: usize = 512;

/// Number and length-prefix encoding of one flavour.
pub(crate) trait NbtVariant {
    fn write_short(buf: &mut impl BufMut, value: i16);
    fn read_short(buf: &mut impl Buf) -> Result<i16, NbtError>;

    fn write_int(buf: &mut impl BufMut, value: i32);
    fn read_int(buf: &mut impl Buf) -> Result<i32, NbtError>;

    fn write_long(buf: &mut impl BufMut, value: i64);
    fn read_long(buf: &mut impl Buf) -> Result<i64, NbtError>;

    fn write_float(buf: &mut impl BufMut, value: f32);
    fn read_float(buf: &mut impl Buf) -> Result<f32, NbtError>;

    fn write_double(buf: &mut impl BufMut, value: f64);
    fn read_double(buf: &mut impl Buf) -> Result<f64, NbtError>;

    fn write_array_len(buf: &mut impl BufMut, len: i32);
    fn read_array_len(buf: &mut impl Buf) -> Result<i32, NbtError>;

    fn write_string_len(buf: &mut impl BufMut, len: usize);
    fn read_string_len(buf: &mut impl Buf) -> Result<usize, NbtError>;
}

pub(crate) fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(NbtError::UnexpectedEof { needed, remaining });
    }
    Ok(())
}

pub(crate) fn read_nbt<V: NbtVariant>(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    Decoder::<V, _>::new(buf).root()
}

/// Read back-to-back roots until the buffer is drained.
pub(crate) fn read_nbt_stream<V: NbtVariant>(
    buf: &mut impl Buf,
) -> Result<Vec<NbtRoot>, NbtError> {
    let mut roots = Vec::new();
    while buf.has_remaining() {
        let root = read_nbt::<V>(buf).map_err(|source| NbtError::StreamRoot {
            index: roots.len(),
            source: Box::new(source),
        })?;
        roots.push(root);
    }
    Ok(roots)
}

pub(crate) fn write_nbt<V: NbtVariant>(buf: &mut impl BufMut, root: &NbtRoot) {
    let mut encoder = Encoder::<V, _>::new(buf);
    encoder.buf.put_u8(TAG_COMPOUND);
    encoder.string(&root.name);
    encoder.compound(&root.compound);
}

struct Decoder<V, B> {
    buf: B,
    depth: usize,
    variant: PhantomData<fn() -> V>,
}

impl<V: NbtVariant, B: Buf> Decoder<V, B> {
    fn new(buf: B) -> Self {
        Self {
            buf,
            depth: 0,
            variant: PhantomData,
        }
    }

    fn root(&mut self) -> Result<NbtRoot, NbtError> {
        let tag_type = self.u8()?;
        if tag_type != TAG_COMPOUND {
            return Err(NbtError::ExpectedCompound { got: tag_type });
        }
        let name = self.string()?;
        let compound = self.compound()?;
        Ok(NbtRoot { name, compound })
    }

    fn payload(&mut self, tag_type: u8) -> Result<NbtTag, NbtError> {
        let tag = match tag_type {
            TAG_BYTE => NbtTag::Byte(self.u8()? as i8),
            TAG_SHORT => NbtTag::Short(V::read_short(&mut self.buf)?),
            TAG_INT => NbtTag::Int(V::read_int(&mut self.buf)?),
            TAG_LONG => NbtTag::Long(V::read_long(&mut self.buf)?),
            TAG_FLOAT => NbtTag::Float(V::read_float(&mut self.buf)?),
            TAG_DOUBLE => NbtTag::Double(V::read_double(&mut self.buf)?),
            TAG_BYTE_ARRAY => {
                let len = self.len()?;
                ensure_remaining(&self.buf, len)?;
                let raw = self.buf.copy_to_bytes(len);
                NbtTag::ByteArray(raw.iter().map(|&b| b as i8).collect())
            }
            TAG_STRING => NbtTag::String(self.string()?),
            TAG_LIST => NbtTag::List(self.list()?),
            TAG_COMPOUND => NbtTag::Compound(self.compound()?),
            TAG_INT_ARRAY => NbtTag::IntArray(self.array(V::read_int)?),
            TAG_LONG_ARRAY => NbtTag::LongArray(self.array(V::read_long)?),
            other => return Err(NbtError::UnknownTagType(other)),
        };
        Ok(tag)
    }

    fn compound(&mut self) -> Result<NbtCompound, NbtError> {
        self.nested(|this| {
            let mut compound = NbtCompound::new();
            loop {
                let tag_type = this.u8()?;
                if tag_type == TAG_END {
                    return Ok(compound);
                }
                let name = this.string()?;
                let tag = this.payload(tag_type)?;
                compound.insert(name, tag);
            }
        })
    }

    fn list(&mut self) -> Result<Vec<NbtTag>, NbtError> {
        let element_type = self.u8()?;
        let len = self.len()?;
        if element_type == TAG_END {
            // Empty lists are allowed to leave their element type unset.
            return match len {
                0 => Ok(Vec::new()),
                len => Err(NbtError::EndTypedList { len }),
            };
        }
        self.nested(|this| {
            let mut list = Vec::with_capacity(len.min(this.buf.remaining()));
            for _ in 0..len {
                list.push(this.payload(element_type)?);
            }
            Ok(list)
        })
    }

    fn array<T>(&mut self, read: fn(&mut B) -> Result<T, NbtError>) -> Result<Vec<T>, NbtError> {
        let len = self.len()?;
        let mut values = Vec::with_capacity(len.min(self.buf.remaining()));
        for _ in 0..len {
            values.push(read(&mut self.buf)?);
        }
        Ok(values)
    }

    fn nested<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, NbtError>,
    ) -> Result<T, NbtError> {
        if self.depth >= MAX_DEPTH {
            return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn u8(&mut self) -> Result<u8, NbtError> {
        ensure_remaining(&self.buf, 1)?;
        Ok(self.buf.get_u8())
    }

    fn len(&mut self) -> Result<usize, NbtError> {
        let len = V::read_array_len(&mut self.buf)?;
        usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))
    }

    fn string(&mut self) -> Result<String, NbtError> {
        let len = V::read_string_len(&mut self.buf)?;
        ensure_remaining(&self.buf, len)?;
        let raw = self.buf.copy_to_bytes(len);
        Ok(String::from_utf8(raw.to_vec())?)
    }
}

struct Encoder<V, B> {
    buf: B,
    variant: PhantomData<fn() -> V>,
}

impl<V: NbtVariant, B: BufMut> Encoder<V, B> {
    fn new(buf: B) -> Self {
        Self {
            buf,
            variant: PhantomData,
        }
    }

    fn payload(&mut self, tag: &NbtTag) {
        match tag {
            NbtTag::Byte(v) => self.buf.put_i8(*v),
            NbtTag::Short(v) => V::write_short(&mut self.buf, *v),
            NbtTag::Int(v) => V::write_int(&mut self.buf, *v),
            NbtTag::Long(v) => V::write_long(&mut self.buf, *v),
            NbtTag::Float(v) => V::write_float(&mut self.buf, *v),
            NbtTag::Double(v) => V::write_double(&mut self.buf, *v),
            NbtTag::ByteArray(values) => {
                V::write_array_len(&mut self.buf, values.len() as i32);
                values.iter().for_each(|&b| self.buf.put_i8(b));
            }
            NbtTag::String(s) => self.string(s),
            NbtTag::List(list) => {
                self.buf.put_u8(list.first().map_or(TAG_END, NbtTag::tag_type_id));
                V::write_array_len(&mut self.buf, list.len() as i32);
                list.iter().for_each(|item| self.payload(item));
            }
            NbtTag::Compound(compound) => self.compound(compound),
            NbtTag::IntArray(values) => self.array(values, V::write_int),
            NbtTag::LongArray(values) => self.array(values, V::write_long),
        }
    }

    fn compound(&mut self, compound: &NbtCompound) {
        for (name, tag) in compound {
            self.buf.put_u8(tag.tag_type_id());
            self.string(name);
            self.payload(tag);
        }
        self.buf.put_u8(TAG_END);
    }

    fn array<T: Copy>(&mut self, values: &[T], write: fn(&mut B, T)) {
        V::write_array_len(&mut self.buf, values.len() as i32);
        for &value in values {
            write(&mut self.buf, value);
        }
    }

    fn string(&mut self, s: &str) {
        V::write_string_len(&mut self.buf, s.len());
        self.buf.put_slice(s.as_bytes());
    }
}
