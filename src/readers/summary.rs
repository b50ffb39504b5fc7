// src/readers/summary.rs

//! Implements `SummarySearch` statistics tracking struct.

use crate::common::{Count, FPath, FileSz};
use crate::data::request::Strategy;
use crate::readers::chunkreader::ChunkSz;
use crate::readers::reversesearcher::SearchStage;

use std::fmt;

use ::more_asserts::debug_assert_le;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SummarySearch
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics of one search, returned with a
/// [`SearchResult`].
///
/// Useful for the `--summary` option and for testing how much of a file a
/// search read.
///
/// [`SearchResult`]: crate::data::request::SearchResult
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummarySearch {
    /// Path of the searched file.
    pub path: FPath,
    /// The strategy that ran (never [`Strategy::Auto`]).
    pub strategy: Strategy,
    /// File size captured when the search began.
    pub filesz: FileSz,
    pub chunksz: ChunkSz,
    /// Count of chunk reads.
    pub chunks_read: Count,
    /// Count of bytes read.
    pub bytes_read: Count,
    /// Count of fully assembled lines, including empty lines.
    pub lines_assembled: Count,
    /// Count of lines that matched the predicate.
    pub lines_matched: Count,
    /// Count of matched lines dropped from a forward search sliding window.
    pub lines_evicted: Count,
    /// Last stage of a backward search, `None` for other strategies.
    pub stage_last: Option<SearchStage>,
}

impl SummarySearch {
    /// The search stopped before reading every byte of the file.
    pub fn is_early_termination(&self) -> bool {
        debug_assert_le!(self.bytes_read, self.filesz, "bytes_read more than filesz");

        self.bytes_read < self.filesz
    }
}

impl fmt::Display for SummarySearch {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        writeln!(f, "File          : {:?}", self.path)?;
        writeln!(f, "Strategy      : {}", self.strategy)?;
        writeln!(f, "File size     : {} (0x{:X})", self.filesz, self.filesz)?;
        writeln!(f, "Chunk size    : {} (0x{:X})", self.chunksz, self.chunksz)?;
        writeln!(f, "Chunks read   : {}", self.chunks_read)?;
        writeln!(f, "Bytes read    : {}", self.bytes_read)?;
        writeln!(f, "Lines         : {}", self.lines_assembled)?;
        writeln!(f, "Lines matched : {}", self.lines_matched)?;
        if self.strategy == Strategy::Forward {
            writeln!(f, "Lines evicted : {}", self.lines_evicted)?;
        }
        match self.stage_last {
            Some(stage) => write!(f, "Last stage    : {:?}", stage),
            None => write!(f, "Last stage    : (none)"),
        }
    }
}
