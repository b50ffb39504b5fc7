// src/readers/chunkreader.rs

//! Implements a [`ChunkReader`], the driver of reading fixed-size chunks of
//! bytes from a [`ByteSource`].
//!
//! [`ChunkReader`]: crate::readers::chunkreader::ChunkReader
//! [`ByteSource`]: crate::readers::bytesource::ByteSource

use crate::common::{Count, FPath, FileOffset, FileSz, ResultS3};
use crate::data::cursor::Cursor;
use crate::readers::bytesource::ByteSource;

use std::fmt;
use std::io::Error;

use ::more_asserts::{assert_ge, assert_le, debug_assert_le};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Chunk
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Chunk Size in bytes
pub type ChunkSz = u64;

/// A `Chunk` is a transient buffer of bytes read from a file.
/// It is handed to a [`LineAssembler`] and not kept by the `ChunkReader`.
///
/// [`LineAssembler`]: crate::readers::lineassembler::LineAssembler
pub type Chunk = Vec<u8>;

/// Minimum chunk size.
pub const CHUNKSZ_MIN: ChunkSz = 1;

/// Maximum chunk size.
pub const CHUNKSZ_MAX: ChunkSz = 0x4000000;

/// Default chunk size.
pub const CHUNKSZ_DEF: ChunkSz = 100;

/// A typed [`ResultS3`] for `ChunkReader` read functions.
/// `Found` holds the file offset of the first byte of the chunk and the
/// chunk.
///
/// [`ResultS3`]: crate::common::ResultS3
#[allow(non_upper_case_globals)]
pub type ResultS3ReadChunk = ResultS3<(FileOffset, Chunk), Error>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ChunkReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `ChunkReader` reads chunks of `chunksz` bytes from a [`ByteSource`].
///
/// A backward read ([`read_chunk_before`]) reads the chunk immediately
/// preceding a [`Cursor`] position. A forward read ([`read_chunk_from`])
/// reads the chunk at a file offset.
///
/// Reads never go past the file size captured when the `ByteSource` was
/// created.
///
/// [`read_chunk_before`]: ChunkReader::read_chunk_before
/// [`read_chunk_from`]: ChunkReader::read_chunk_from
pub struct ChunkReader<S: ByteSource> {
    source: S,
    /// Chunk size in bytes.
    chunksz: ChunkSz,
    /// File size captured at creation.
    filesz: FileSz,
    /// Count of chunks read (`Found`).
    chunks_read: Count,
    /// Count of bytes read.
    bytes_read: Count,
}

impl<S: ByteSource> fmt::Debug for ChunkReader<S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("ChunkReader")
            .field("path", self.source.path())
            .field("chunksz", &self.chunksz)
            .field("filesz", &self.filesz)
            .field("chunks_read", &self.chunks_read)
            .field("bytes_read", &self.bytes_read)
            .finish()
    }
}

impl<S: ByteSource> ChunkReader<S> {
    /// Create a new `ChunkReader`.
    ///
    /// `chunksz` must be within [`CHUNKSZ_MIN`] and [`CHUNKSZ_MAX`].
    pub fn new(
        source: S,
        chunksz: ChunkSz,
    ) -> ChunkReader<S> {
        defn!("({:?}, {})", source.path(), chunksz);
        assert_ge!(chunksz, CHUNKSZ_MIN, "Chunk Size {} is too small", chunksz);
        assert_le!(chunksz, CHUNKSZ_MAX, "Chunk Size {} is too big", chunksz);

        let filesz: FileSz = source.filesz();
        defx!("filesz {}", filesz);

        ChunkReader {
            source,
            chunksz,
            filesz,
            chunks_read: 0,
            bytes_read: 0,
        }
    }

    #[inline(always)]
    pub fn path(&self) -> &FPath {
        self.source.path()
    }

    #[inline(always)]
    pub const fn chunksz(&self) -> ChunkSz {
        self.chunksz
    }

    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }

    #[inline(always)]
    pub const fn chunks_read(&self) -> Count {
        self.chunks_read
    }

    #[inline(always)]
    pub const fn bytes_read(&self) -> Count {
        self.bytes_read
    }

    /// Read `[beg, end)` from the `ByteSource`.
    fn read_range(
        &mut self,
        beg: FileOffset,
        end: FileOffset,
    ) -> ResultS3ReadChunk {
        defn!("({}, {})", beg, end);
        debug_assert_le!(beg, end, "bad range");
        debug_assert_le!(end, self.filesz, "read past filesz");
        if beg == end {
            defx!("return Done; empty range");
            return ResultS3ReadChunk::Done;
        }
        let mut chunk: Chunk = vec![0; (end - beg) as usize];
        match self.source.read_exact_at(beg, chunk.as_mut_slice()) {
            Ok(_) => {}
            Err(err) => {
                defx!("return Err({})", err);
                return ResultS3ReadChunk::Err(err);
            }
        }
        self.chunks_read += 1;
        self.bytes_read += chunk.len() as Count;
        defx!("return Found({}, len {})", beg, chunk.len());

        ResultS3ReadChunk::Found((beg, chunk))
    }

    /// Read the chunk of up to `chunksz` bytes immediately preceding
    /// `cursor.current_pos()`, then move the `cursor` to the beginning of
    /// that chunk.
    ///
    /// Returns `Done` when the `cursor` is at offset `0`.
    /// The `cursor` is not moved when an error is returned.
    pub fn read_chunk_before(
        &mut self,
        cursor: &mut Cursor,
    ) -> ResultS3ReadChunk {
        defn!("({:?})", cursor);
        if cursor.is_start() {
            defx!("return Done; cursor at start");
            return ResultS3ReadChunk::Done;
        }
        let (beg, end) = cursor.next_window(self.chunksz);
        let result = self.read_range(beg, end);
        if result.is_found() {
            cursor.retreat_to(beg);
        }
        defx!("{}", result);

        result
    }

    /// Read all bytes `[0, cursor.current_pos())` in one read, then move
    /// the `cursor` to offset `0`.
    ///
    /// Used at the starting edge of a file where fewer than `chunksz`
    /// bytes remain.
    pub fn read_chunk_prefix(
        &mut self,
        cursor: &mut Cursor,
    ) -> ResultS3ReadChunk {
        defn!("({:?})", cursor);
        debug_assert_le!(cursor.current_pos(), self.chunksz, "prefix is larger than a chunk");
        let result = self.read_range(0, cursor.current_pos());
        if result.is_found() {
            cursor.retreat_to(0);
        }
        defx!("{}", result);

        result
    }

    /// Read the chunk of up to `chunksz` bytes at `fileoffset`, clamped to
    /// the file size.
    ///
    /// Returns `Done` when `fileoffset` is at or past the end of file.
    pub fn read_chunk_from(
        &mut self,
        fileoffset: FileOffset,
    ) -> ResultS3ReadChunk {
        defn!("({})", fileoffset);
        if fileoffset >= self.filesz {
            defx!("return Done; end of file");
            return ResultS3ReadChunk::Done;
        }
        let end: FileOffset = std::cmp::min(fileoffset.saturating_add(self.chunksz), self.filesz);
        let result = self.read_range(fileoffset, end);
        defx!("{}", result);

        result
    }

    /// Read the entire file in one read.
    ///
    /// Returns `Done` for an empty file.
    pub fn read_all(&mut self) -> ResultS3ReadChunk {
        defñ!();
        self.read_range(0, self.filesz)
    }
}
