// src/data/line.rs

//! Implement [`Line`], one fully assembled line of a file.
//!
//! [`Line`]: crate::data::line::Line

use crate::common::{Bytes, FileOffset, CRu8};
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;
use std::string::FromUtf8Error;

/// A fully assembled line of bytes, without the line terminator and without
/// a trailing carriage return.
///
/// A `Line` is only created after all bytes between two line terminators
/// (or a line terminator and the start or end of the file) were read.
/// Decoding to text happens on a `Line`, never on a part of a line.
pub struct Line {
    /// File offset of the first byte of the line.
    fileoffset_begin: FileOffset,
    bytes: Bytes,
}

impl fmt::Debug for Line {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Line")
            .field("fileoffset_begin", &self.fileoffset_begin)
            .field("len", &self.bytes.len())
            .field("bytes", &buffer_to_String_noraw(&self.bytes))
            .finish()
    }
}

impl Line {
    /// Create a new `Line` from the bytes between line terminators.
    /// A trailing `'\r'` is removed.
    pub fn new(
        fileoffset_begin: FileOffset,
        mut bytes: Bytes,
    ) -> Line {
        if bytes.last() == Some(&CRu8) {
            bytes.pop();
        }

        Line {
            fileoffset_begin,
            bytes,
        }
    }

    #[inline(always)]
    pub const fn fileoffset_begin(&self) -> FileOffset {
        self.fileoffset_begin
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Decode the line as UTF-8 text, consuming the `Line`.
    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.bytes)
    }
}
