// src/readers/reversesearcher.rs

//! Implements a [`ReverseSearcher`], the driver of a backward search of a
//! file for the most recent matching lines.
//!
//! [`ReverseSearcher`]: crate::readers::reversesearcher::ReverseSearcher

use crate::common::{Canceller, Count, FPath, FileOffset, ResultS3, SearchError};
use crate::data::collector::BoundedCollector;
use crate::data::cursor::Cursor;
use crate::data::line::Line;
use crate::data::predicate::MatchPredicate;
use crate::data::request::{SearchResult, Strategy};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::bytesource::ByteSource;
use crate::readers::chunkreader::{ChunkReader, ChunkSz};
use crate::readers::lineassembler::LineAssembler;
use crate::readers::searchprocessor::Searcher;
use crate::readers::summary::SummarySearch;

use std::fmt;

use ::more_asserts::debug_assert_le;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helpers shared by all searchers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decode a fully assembled [`Line`] of file `path`.
///
/// [`Line`]: crate::data::line::Line
pub(crate) fn decode_line(
    path: &FPath,
    line: Line,
) -> Result<String, SearchError> {
    let fileoffset: FileOffset = line.fileoffset_begin();
    match line.into_string() {
        Ok(text) => Ok(text),
        Err(_err) => {
            de_wrn!("line at {} of {:?} is not UTF-8: {}", fileoffset, path, _err);
            Err(SearchError::DecodeFailure {
                path: path.clone(),
                fileoffset,
            })
        }
    }
}

/// Return `Err(Cancelled)` if the `canceller` was raised.
pub(crate) fn check_cancelled(canceller: &Canceller) -> Result<(), SearchError> {
    if canceller.is_cancelled() {
        defñ!("cancelled");
        return Err(SearchError::Cancelled);
    }

    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ReverseSearcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stages of a [`ReverseSearcher`].
///
/// A search only moves forward through the stages:
/// `Scanning` → `StartingEdge` → `Done`, or `Scanning` → `Done` when
/// enough lines were found.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SearchStage {
    /// Reading full chunks backward from the end of the file.
    #[default]
    Scanning,
    /// Fewer than a chunk of bytes remain before the start of the file.
    StartingEdge,
    /// Finished; the collected lines are the result.
    Done,
}

/// A `ReverseSearcher` searches a file backward, last line first, for
/// lines matching a [`MatchPredicate`], and stops once `count` lines were
/// found.
///
/// Chunks are read with a [`ChunkReader`] and split into [`Line`s] by a
/// [`LineAssembler`]. Memory use is bounded by the chunk size, the longest
/// line, and the collected lines.
///
/// Empty lines are skipped and never matched. A trailing line terminator at
/// the end of the file does not create an extra line.
///
/// [`MatchPredicate`]: crate::data::predicate::MatchPredicate
/// [`Line`s]: crate::data::line::Line
pub struct ReverseSearcher<S: ByteSource> {
    chunkreader: ChunkReader<S>,
    assembler: LineAssembler,
    cursor: Cursor,
    predicate: MatchPredicate,
    collector: BoundedCollector,
    canceller: Canceller,
    stage: SearchStage,
    /// The last stage processed before `Done`.
    stage_last: Option<SearchStage>,
    lines_matched: Count,
}

impl<S: ByteSource> fmt::Debug for ReverseSearcher<S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("ReverseSearcher")
            .field("chunkreader", &self.chunkreader)
            .field("cursor", &self.cursor)
            .field("predicate", &self.predicate)
            .field("stage", &self.stage)
            .field("lines_matched", &self.lines_matched)
            .finish()
    }
}

impl<S: ByteSource> ReverseSearcher<S> {
    /// Create a new `ReverseSearcher` of `source`.
    ///
    /// `count` of `0` returns all matching lines.
    pub fn new(
        source: S,
        predicate: MatchPredicate,
        count: Count,
        chunksz: ChunkSz,
        canceller: Canceller,
    ) -> ReverseSearcher<S> {
        defn!("({:?}, {:?}, {}, {})", source.path(), predicate, count, chunksz);
        let chunkreader: ChunkReader<S> = ChunkReader::new(source, chunksz);
        let cursor: Cursor = Cursor::new(chunkreader.filesz());
        defx!("{:?}", cursor);

        ReverseSearcher {
            chunkreader,
            assembler: LineAssembler::new(),
            cursor,
            predicate,
            collector: BoundedCollector::new(count),
            canceller,
            stage: SearchStage::default(),
            stage_last: None,
            lines_matched: 0,
        }
    }

    #[inline(always)]
    pub const fn stage(&self) -> SearchStage {
        self.stage
    }

    #[inline(always)]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Move to the next stage.
    fn set_stage(
        &mut self,
        stage: SearchStage,
    ) {
        defo!("{:?} → {:?}", self.stage, stage);
        debug_assert!(
            matches!(
                (self.stage, stage),
                (SearchStage::Scanning, SearchStage::StartingEdge)
                | (SearchStage::Scanning, SearchStage::Done)
                | (SearchStage::StartingEdge, SearchStage::Done)
            ),
            "bad stage transition {:?} → {:?}",
            self.stage,
            stage
        );
        self.stage_last = Some(self.stage);
        self.stage = stage;
    }

    /// Decode and match one `line`. Returns `true` if the collector is full.
    fn process_line(
        &mut self,
        line: Line,
    ) -> Result<bool, SearchError> {
        if line.is_empty() {
            return Ok(self.collector.is_full());
        }
        let text: String = decode_line(self.chunkreader.path(), line)?;
        if self.predicate.is_match(&text) {
            defo!("matched {:?}", text);
            self.lines_matched += 1;
            self.collector.accept(text);
        }

        Ok(self.collector.is_full())
    }

    /// Process all complete lines of the chunk last pushed to the
    /// assembler. Returns `true` if the collector is full.
    fn drain_lines(&mut self) -> Result<bool, SearchError> {
        while let Some(line) = self.assembler.next_line() {
            if self.process_line(line)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Stage `Scanning`: read full chunks backward until the collector is
    /// full or less than a chunk remains.
    fn process_stage_scanning(&mut self) -> Result<(), SearchError> {
        defn!();
        loop {
            if self.collector.is_full() {
                self.set_stage(SearchStage::Done);
                break;
            }
            if self.cursor.is_starting_edge(self.chunkreader.chunksz()) {
                self.set_stage(SearchStage::StartingEdge);
                break;
            }
            check_cancelled(&self.canceller)?;
            match self.chunkreader.read_chunk_before(&mut self.cursor) {
                ResultS3::Found((fileoffset, chunk)) => {
                    debug_assert_eq!(self.cursor.current_pos(), fileoffset);
                    debug_assert_eq!(self.cursor.window_end_pos(), fileoffset + chunk.len() as FileOffset);
                    debug_assert_le!(self.cursor.window_end_pos(), self.cursor.fileoffset_end());
                    self.assembler.push_chunk(fileoffset, chunk);
                    self.drain_lines()?;
                }
                ResultS3::Done => {
                    self.set_stage(SearchStage::StartingEdge);
                    break;
                }
                ResultS3::Err(err) => {
                    de_err!("read_chunk_before({:?}) {}", self.cursor, err);
                    defx!("return IOFailure");
                    return Err(SearchError::IOFailure(self.chunkreader.path().clone(), err));
                }
            }
        }
        defx!("{:?}", self.stage);

        Ok(())
    }

    /// Stage `StartingEdge`: read the remaining bytes in one read, process
    /// those lines and the first line of the file.
    fn process_stage_starting_edge(&mut self) -> Result<(), SearchError> {
        defn!("{:?}", self.cursor);
        check_cancelled(&self.canceller)?;
        match self.chunkreader.read_chunk_prefix(&mut self.cursor) {
            ResultS3::Found((fileoffset, chunk)) => {
                self.assembler.push_chunk(fileoffset, chunk);
                if self.drain_lines()? {
                    self.set_stage(SearchStage::Done);
                    defx!("collector is full");
                    return Ok(());
                }
            }
            ResultS3::Done => {}
            ResultS3::Err(err) => {
                de_err!("read_chunk_prefix({:?}) {}", self.cursor, err);
                defx!("return IOFailure");
                return Err(SearchError::IOFailure(self.chunkreader.path().clone(), err));
            }
        }
        debug_assert!(self.cursor.is_start(), "cursor not at start of file {:?}", self.cursor);
        if let Some(line) = self.assembler.finish() {
            self.process_line(line)?;
        }
        debug_assert_eq!(self.assembler.pending_len(), 0, "bytes left in assembler");
        self.set_stage(SearchStage::Done);
        defx!();

        Ok(())
    }

    fn summary(&self) -> SummarySearch {
        SummarySearch {
            path: self.chunkreader.path().clone(),
            strategy: Strategy::Backward,
            filesz: self.chunkreader.filesz(),
            chunksz: self.chunkreader.chunksz(),
            chunks_read: self.chunkreader.chunks_read(),
            bytes_read: self.chunkreader.bytes_read(),
            lines_assembled: self.assembler.lines_assembled(),
            lines_matched: self.lines_matched,
            lines_evicted: 0,
            stage_last: self.stage_last,
        }
    }
}

impl<S: ByteSource> Searcher for ReverseSearcher<S> {
    /// Run the search to `Done`.
    ///
    /// The `ByteSource` is dropped on return, including error returns.
    fn process(mut self) -> Result<SearchResult, SearchError> {
        defn!("{:?}", self);
        loop {
            match self.stage {
                SearchStage::Scanning => self.process_stage_scanning()?,
                SearchStage::StartingEdge => self.process_stage_starting_edge()?,
                SearchStage::Done => break,
            }
        }
        let summary: SummarySearch = self.summary();
        let lines: Vec<String> = self.collector.into_lines();
        defx!("return {} lines", lines.len());

        Ok(SearchResult { lines, summary })
    }
}
