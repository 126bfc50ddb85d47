//! Decoding errors for palette and state documents.

use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("truncated NBT: needed {needed} byte(s), {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("document root must be a compound (tag 10), found tag {got}")]
    ExpectedCompound { got: u8 },

    #[error("tag type {0} does not exist")]
    UnknownTagType(u8),

    #[error("list of {len} element(s) declares TAG_End as its element type")]
    EndTypedList { len: usize },

    #[error("tag name or string value is not UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("compounds and lists nested deeper than {limit}")]
    NestingTooDeep { limit: usize },

    #[error("length prefix is negative ({0})")]
    NegativeLength(i32),

    #[error("variable-length integer runs past {max_bytes} bytes")]
    VarIntTooLong { max_bytes: usize },

    /// A root inside a concatenated stream failed to decode.
    #[error("root #{index} of the stream: {source}")]
    StreamRoot {
        index: usize,
        #[source]
        source: Box<NbtError>,
    },
}
