// src/readers/lineassembler.rs

//! Implements a [`LineAssembler`], the driver of deriving [`Line`s] from
//! chunks read backward.
//!
//! [`LineAssembler`]: crate::readers::lineassembler::LineAssembler
//! [`Line`s]: crate::data::line::Line

use crate::common::{Bytes, Count, FileOffset, NLu8};
use crate::data::line::Line;
#[allow(unused_imports)]
use crate::debug::printers::buffer_to_String_noraw;
use crate::readers::chunkreader::Chunk;

use std::fmt;

use ::memchr::memrchr;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A `LineAssembler` finds the line terminators in chunks of a file that are
/// pushed in last-to-first order, and assembles the bytes between them into
/// [`Line`s], last line first.
///
/// The bytes of the chunk that follow the last terminator belong to the
/// line that continues into the following chunk, so they are joined to the
/// pending tail carried from that following chunk. Bytes before the first
/// terminator of a chunk become the new pending tail.
///
/// The pending tail is kept as a list of parts so a line that spans many
/// chunks is only copied once, when it is complete.
///
/// [`Line`s]: crate::data::line::Line
pub struct LineAssembler {
    /// The chunk being split.
    current: Chunk,
    /// File offset of the first byte of `current`.
    current_fileoffset: FileOffset,
    /// Bytes of `current` at and after this index were emitted as lines.
    current_end: usize,
    /// Parts of the pending tail, in last-to-first file order.
    tail: Vec<Bytes>,
    /// Sum of the lengths of `tail`.
    tail_len: usize,
    /// File offset of the first byte of the pending tail.
    tail_fileoffset: FileOffset,
    /// File offset expected of the end of the next pushed chunk.
    /// `None` before the first chunk is pushed.
    fileoffset_next_end: Option<FileOffset>,
    /// Count of [`Line`s] returned.
    ///
    /// [`Line`s]: crate::data::line::Line
    lines_assembled: Count,
}

impl fmt::Debug for LineAssembler {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineAssembler")
            .field("current_fileoffset", &self.current_fileoffset)
            .field("current_end", &self.current_end)
            .field("tail parts", &self.tail.len())
            .field("tail_len", &self.tail_len)
            .field("tail_fileoffset", &self.tail_fileoffset)
            .field("lines_assembled", &self.lines_assembled)
            .finish()
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        LineAssembler::new()
    }
}

impl LineAssembler {
    pub fn new() -> LineAssembler {
        LineAssembler {
            current: Chunk::with_capacity(0),
            current_fileoffset: 0,
            current_end: 0,
            tail: Vec::<Bytes>::new(),
            tail_len: 0,
            tail_fileoffset: 0,
            fileoffset_next_end: None,
            lines_assembled: 0,
        }
    }

    /// Count of bytes of the pending tail.
    #[inline(always)]
    pub const fn pending_len(&self) -> usize {
        self.tail_len
    }

    #[inline(always)]
    pub const fn lines_assembled(&self) -> Count {
        self.lines_assembled
    }

    /// Push the `chunk` that immediately precedes the previously pushed
    /// chunk. `fileoffset` is the file offset of the first byte of `chunk`.
    ///
    /// All lines of the previous chunk must have been taken with
    /// [`next_line`] (it returned `None`).
    ///
    /// [`next_line`]: LineAssembler::next_line
    pub fn push_chunk(
        &mut self,
        fileoffset: FileOffset,
        chunk: Chunk,
    ) {
        defn!("({}, chunk len {})", fileoffset, chunk.len());
        debug_assert_eq!(self.current_end, 0, "previous chunk was not consumed");
        if let Some(fileoffset_next_end) = self.fileoffset_next_end {
            debug_assert_eq!(
                fileoffset + chunk.len() as FileOffset,
                fileoffset_next_end,
                "chunk at {} len {} does not precede the previous chunk",
                fileoffset,
                chunk.len(),
            );
        }
        self.fileoffset_next_end = Some(fileoffset);
        self.current_end = chunk.len();
        self.current = chunk;
        self.current_fileoffset = fileoffset;
        defx!();
    }

    /// Join `current[begin..end]` with the pending tail, clearing the
    /// pending tail.
    fn take_with_tail(
        &mut self,
        begin: usize,
        end: usize,
    ) -> Bytes {
        let head: &[u8] = &self.current[begin..end];
        let mut bytes: Bytes = Bytes::with_capacity(head.len() + self.tail_len);
        bytes.extend_from_slice(head);
        for part in self.tail.iter().rev() {
            bytes.extend_from_slice(part);
        }
        self.tail.clear();
        self.tail_len = 0;

        bytes
    }

    /// Return the next complete line, working backward through the current
    /// chunk.
    ///
    /// Returns `None` when no further line terminator is in the current
    /// chunk; the remaining bytes of the chunk become the head of the pending
    /// tail. The caller should then push the preceding chunk, or call
    /// [`finish`] at the start of the file.
    ///
    /// The returned [`Line`] may be empty.
    ///
    /// [`finish`]: LineAssembler::finish
    /// [`Line`]: crate::data::line::Line
    pub fn next_line(&mut self) -> Option<Line> {
        defn!("{:?}", self);
        match memrchr(NLu8, &self.current[..self.current_end]) {
            Some(index) => {
                let begin: usize = index + 1;
                let fileoffset_begin: FileOffset = self.current_fileoffset + begin as FileOffset;
                let bytes: Bytes = self.take_with_tail(begin, self.current_end);
                self.current_end = index;
                self.lines_assembled += 1;
                let line = Line::new(fileoffset_begin, bytes);
                defx!("return {:?}", line);

                Some(line)
            }
            None => {
                // the remainder of this chunk precedes the pending tail
                let mut part: Chunk = std::mem::take(&mut self.current);
                part.truncate(self.current_end);
                self.current_end = 0;
                if !part.is_empty() {
                    defo!("pending part {:?}", buffer_to_String_noraw(&part));
                    self.tail_len += part.len();
                    self.tail.push(part);
                    self.tail_fileoffset = self.current_fileoffset;
                }
                defx!("return None; pending_len {}", self.tail_len);

                None
            }
        }
    }

    /// At the start of the file, return the pending tail as the first line
    /// of the file.
    ///
    /// Returns `None` if there are no pending bytes.
    pub fn finish(&mut self) -> Option<Line> {
        defn!("{:?}", self);
        debug_assert_eq!(self.current_end, 0, "current chunk was not consumed");
        if self.tail_len == 0 {
            defx!("return None");
            return None;
        }
        let fileoffset_begin: FileOffset = self.tail_fileoffset;
        let bytes: Bytes = self.take_with_tail(0, 0);
        self.lines_assembled += 1;
        let line = Line::new(fileoffset_begin, bytes);
        defx!("return {:?}", line);

        Some(line)
    }
}
