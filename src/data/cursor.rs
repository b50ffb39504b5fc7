// src/data/cursor.rs

//! Implements the [`Cursor`] of a backward search.
//!
//! [`Cursor`]: crate::data::cursor::Cursor

use crate::common::{FileOffset, FileSz};
use crate::readers::chunkreader::ChunkSz;

use ::more_asserts::{assert_le, debug_assert_le};

/// Offsets tracking the progress of one backward search through a file.
///
/// Bytes at and after `current_pos` (up to `fileoffset_end`) were consumed.
/// Bytes before `current_pos` are not yet scanned. `window_end_pos` is the
/// end of the most recently read chunk.
///
/// A `Cursor` is owned by exactly one search. It never moves before offset
/// `0` nor after the end of file offset captured when the search began.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor {
    current_pos: FileOffset,
    window_end_pos: FileOffset,
    /// File size captured at the start of the search.
    fileoffset_end: FileOffset,
}

impl Cursor {
    /// Create a `Cursor` at the end of a file of size `filesz`.
    pub const fn new(filesz: FileSz) -> Cursor {
        Cursor {
            current_pos: filesz,
            window_end_pos: filesz,
            fileoffset_end: filesz,
        }
    }

    #[inline(always)]
    pub const fn current_pos(&self) -> FileOffset {
        self.current_pos
    }

    #[inline(always)]
    pub const fn window_end_pos(&self) -> FileOffset {
        self.window_end_pos
    }

    #[inline(always)]
    pub const fn fileoffset_end(&self) -> FileOffset {
        self.fileoffset_end
    }

    /// All bytes have been scanned.
    #[inline(always)]
    pub const fn is_start(&self) -> bool {
        self.current_pos == 0
    }

    /// Fewer than `chunksz` bytes remain before offset `0`.
    #[inline(always)]
    pub const fn is_starting_edge(&self, chunksz: ChunkSz) -> bool {
        self.current_pos < chunksz
    }

    /// The `[begin, end)` window of the next chunk of `chunksz` bytes
    /// preceding `current_pos`, clamped to offset `0`.
    pub const fn next_window(&self, chunksz: ChunkSz) -> (FileOffset, FileOffset) {
        (self.current_pos.saturating_sub(chunksz), self.current_pos)
    }

    /// Mark all bytes at and after `begin` as consumed.
    pub fn retreat_to(&mut self, begin: FileOffset) {
        assert_le!(begin, self.current_pos, "Cursor cannot move forward");
        self.window_end_pos = self.current_pos;
        self.current_pos = begin;
        debug_assert_le!(self.window_end_pos, self.fileoffset_end);
    }
}
