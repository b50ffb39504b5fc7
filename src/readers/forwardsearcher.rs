// src/readers/forwardsearcher.rs

//! Implements the forward searchers [`ForwardSearcher`] and
//! [`LoadAllSearcher`].
//!
//! Both read the entire file from the beginning. They return the same lines
//! as a [`ReverseSearcher`] for files of valid UTF-8.
//!
//! [`ForwardSearcher`]: crate::readers::forwardsearcher::ForwardSearcher
//! [`LoadAllSearcher`]: crate::readers::forwardsearcher::LoadAllSearcher
//! [`ReverseSearcher`]: crate::readers::reversesearcher::ReverseSearcher

use crate::common::{Bytes, Canceller, Count, FileOffset, NLu8, ResultS3, SearchError};
use crate::data::collector::SlidingWindow;
use crate::data::line::Line;
use crate::data::predicate::MatchPredicate;
use crate::data::request::{SearchResult, Strategy};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::bytesource::ByteSource;
use crate::readers::chunkreader::{Chunk, ChunkReader, ChunkSz};
use crate::readers::reversesearcher::{check_cancelled, decode_line};
use crate::readers::searchprocessor::Searcher;
use crate::readers::summary::SummarySearch;

use ::memchr::memchr_iter;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ForwardSearcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `ForwardSearcher` reads a file once from beginning to end in chunks,
/// keeping the most recent `count` matching lines in a [`SlidingWindow`].
/// The window is reversed at the end so lines are most recent first.
///
/// Memory use is bounded by the chunk size, the longest line, and `count`.
///
/// [`SlidingWindow`]: crate::data::collector::SlidingWindow
#[derive(Debug)]
pub struct ForwardSearcher<S: ByteSource> {
    chunkreader: ChunkReader<S>,
    predicate: MatchPredicate,
    window: SlidingWindow,
    canceller: Canceller,
    /// Bytes of the line continuing into the next chunk.
    pending: Bytes,
    /// File offset of the first byte of `pending`.
    pending_fileoffset: FileOffset,
    lines_assembled: Count,
    lines_matched: Count,
}

impl<S: ByteSource> ForwardSearcher<S> {
    pub fn new(
        source: S,
        predicate: MatchPredicate,
        count: Count,
        chunksz: ChunkSz,
        canceller: Canceller,
    ) -> ForwardSearcher<S> {
        defñ!("({:?}, {:?}, {}, {})", source.path(), predicate, count, chunksz);

        ForwardSearcher {
            chunkreader: ChunkReader::new(source, chunksz),
            predicate,
            window: SlidingWindow::new(count),
            canceller,
            pending: Bytes::new(),
            pending_fileoffset: 0,
            lines_assembled: 0,
            lines_matched: 0,
        }
    }

    fn process_line(
        &mut self,
        line: Line,
    ) -> Result<(), SearchError> {
        self.lines_assembled += 1;
        if line.is_empty() {
            return Ok(());
        }
        let text: String = decode_line(self.chunkreader.path(), line)?;
        if self.predicate.is_match(&text) {
            defo!("matched {:?}", text);
            self.lines_matched += 1;
            self.window.push(text);
        }

        Ok(())
    }

    /// Split `chunk` at each line terminator. The first line is joined to
    /// the pending bytes, the bytes after the last terminator become the
    /// new pending bytes.
    fn process_chunk(
        &mut self,
        fileoffset: FileOffset,
        chunk: Chunk,
    ) -> Result<(), SearchError> {
        defn!("({}, chunk len {})", fileoffset, chunk.len());
        let mut begin: usize = 0;
        for index in memchr_iter(NLu8, &chunk) {
            let line: Line = if begin == 0 {
                let mut bytes: Bytes = std::mem::take(&mut self.pending);
                bytes.extend_from_slice(&chunk[..index]);
                Line::new(self.pending_fileoffset, bytes)
            } else {
                Line::new(fileoffset + begin as FileOffset, chunk[begin..index].to_vec())
            };
            self.process_line(line)?;
            begin = index + 1;
        }
        if begin != 0 {
            self.pending_fileoffset = fileoffset + begin as FileOffset;
        }
        self.pending.extend_from_slice(&chunk[begin..]);
        defx!("pending len {}", self.pending.len());

        Ok(())
    }
}

impl<S: ByteSource> Searcher for ForwardSearcher<S> {
    fn process(mut self) -> Result<SearchResult, SearchError> {
        defn!();
        let mut fileoffset: FileOffset = 0;
        loop {
            check_cancelled(&self.canceller)?;
            match self.chunkreader.read_chunk_from(fileoffset) {
                ResultS3::Found((fileoffset_chunk, chunk)) => {
                    fileoffset = fileoffset_chunk + chunk.len() as FileOffset;
                    self.process_chunk(fileoffset_chunk, chunk)?;
                }
                ResultS3::Done => break,
                ResultS3::Err(err) => {
                    de_err!("read_chunk_from({}) {}", fileoffset, err);
                    defx!("return IOFailure");
                    return Err(SearchError::IOFailure(self.chunkreader.path().clone(), err));
                }
            }
        }
        // last line of a file without a trailing line terminator
        if !self.pending.is_empty() {
            let bytes: Bytes = std::mem::take(&mut self.pending);
            self.process_line(Line::new(self.pending_fileoffset, bytes))?;
        }
        let summary = SummarySearch {
            path: self.chunkreader.path().clone(),
            strategy: Strategy::Forward,
            filesz: self.chunkreader.filesz(),
            chunksz: self.chunkreader.chunksz(),
            chunks_read: self.chunkreader.chunks_read(),
            bytes_read: self.chunkreader.bytes_read(),
            lines_assembled: self.lines_assembled,
            lines_matched: self.lines_matched,
            lines_evicted: self.window.count_evicted(),
            stage_last: None,
        };
        let lines: Vec<String> = self.window.into_lines_newest_first();
        defx!("return {} lines", lines.len());

        Ok(SearchResult { lines, summary })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LoadAllSearcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `LoadAllSearcher` reads the entire file into memory in one read,
/// filters all lines, then keeps the last `count` matches, most recent first.
///
/// Memory use is proportional to the file size. Best for small files.
#[derive(Debug)]
pub struct LoadAllSearcher<S: ByteSource> {
    chunkreader: ChunkReader<S>,
    predicate: MatchPredicate,
    count: Count,
    canceller: Canceller,
}

impl<S: ByteSource> LoadAllSearcher<S> {
    /// `chunksz` is only reported in the summary; the file is read in one
    /// read.
    pub fn new(
        source: S,
        predicate: MatchPredicate,
        count: Count,
        chunksz: ChunkSz,
        canceller: Canceller,
    ) -> LoadAllSearcher<S> {
        defñ!("({:?}, {:?}, {}, {})", source.path(), predicate, count, chunksz);

        LoadAllSearcher {
            chunkreader: ChunkReader::new(source, chunksz),
            predicate,
            count,
            canceller,
        }
    }
}

impl<S: ByteSource> Searcher for LoadAllSearcher<S> {
    fn process(mut self) -> Result<SearchResult, SearchError> {
        defn!();
        check_cancelled(&self.canceller)?;
        let data: Chunk = match self.chunkreader.read_all() {
            ResultS3::Found((_, data)) => data,
            ResultS3::Done => Chunk::with_capacity(0),
            ResultS3::Err(err) => {
                de_err!("read_all() {}", err);
                defx!("return IOFailure");
                return Err(SearchError::IOFailure(self.chunkreader.path().clone(), err));
            }
        };
        let mut lines_assembled: Count = 0;
        let mut matches: Vec<String> = Vec::new();
        let mut begin: usize = 0;
        let ends = memchr_iter(NLu8, &data).chain(std::iter::once(data.len()));
        for end in ends {
            let line = Line::new(begin as FileOffset, data[begin..end].to_vec());
            begin = end + 1;
            lines_assembled += 1;
            if line.is_empty() {
                continue;
            }
            let text: String = decode_line(self.chunkreader.path(), line)?;
            if self.predicate.is_match(&text) {
                matches.push(text);
            }
        }
        let lines_matched: Count = matches.len() as Count;
        let skip: usize = match self.count {
            0 => 0,
            count => matches.len().saturating_sub(count as usize),
        };
        let lines: Vec<String> = matches
            .into_iter()
            .skip(skip)
            .rev()
            .collect();
        let summary = SummarySearch {
            path: self.chunkreader.path().clone(),
            strategy: Strategy::LoadAll,
            filesz: self.chunkreader.filesz(),
            chunksz: self.chunkreader.chunksz(),
            chunks_read: self.chunkreader.chunks_read(),
            bytes_read: self.chunkreader.bytes_read(),
            lines_assembled,
            lines_matched,
            lines_evicted: 0,
            stage_last: None,
        };
        defx!("return {} lines", lines.len());

        Ok(SearchResult { lines, summary })
    }
}
