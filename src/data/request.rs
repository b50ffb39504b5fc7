// src/data/request.rs

//! The request and response types of a search: [`SearchRequest`],
//! [`SearchResult`], [`SearchResponse`], and the search [`Strategy`].
//!
//! [`SearchRequest`]: crate::data::request::SearchRequest
//! [`SearchResult`]: crate::data::request::SearchResult
//! [`SearchResponse`]: crate::data::request::SearchResponse
//! [`Strategy`]: crate::data::request::Strategy

use crate::common::{Count, FPath, FileSz, SearchError};
use crate::readers::chunkreader::{ChunkSz, CHUNKSZ_DEF, CHUNKSZ_MAX, CHUNKSZ_MIN};
use crate::readers::summary::SummarySearch;

use std::fmt;

/// Files at most this size are entirely read by [`Strategy::Auto`].
pub const LOAD_ALL_FILESZ_MAX: FileSz = 0x10000;

/// `SearchResponse.message` of a successful search.
pub const MESSAGE_SUCCESS: &str = "Data successfully fetched";

/// Search strategies. All strategies return the same [`SearchResult`] for
/// the same request; they differ only in how much of the file they read and
/// how.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Strategy {
    /// Read the file backward in chunks and stop at `count` matches.
    /// See [`ReverseSearcher`].
    ///
    /// [`ReverseSearcher`]: crate::readers::reversesearcher::ReverseSearcher
    #[default]
    Backward,
    /// Read the entire file forward, keeping a sliding window of the last
    /// `count` matches. See [`ForwardSearcher`].
    ///
    /// [`ForwardSearcher`]: crate::readers::forwardsearcher::ForwardSearcher
    Forward,
    /// Read the entire file into memory then filter it.
    /// See [`LoadAllSearcher`].
    ///
    /// [`LoadAllSearcher`]: crate::readers::forwardsearcher::LoadAllSearcher
    LoadAll,
    /// Choose one of the other strategies based on the file size and
    /// `count`. See [`Strategy::resolve`].
    Auto,
}

impl Strategy {
    /// Return the strategy to run for a file of size `filesz` and the
    /// requested `count`. Only [`Strategy::Auto`] changes.
    ///
    /// * small files (at most [`LOAD_ALL_FILESZ_MAX`]) are entirely read.
    /// * a `count` of `0` must read the whole file so read it forward.
    /// * otherwise read backward.
    pub const fn resolve(
        self,
        filesz: FileSz,
        count: Count,
    ) -> Strategy {
        match self {
            Strategy::Auto => {
                if filesz <= LOAD_ALL_FILESZ_MAX {
                    Strategy::LoadAll
                } else if count == 0 {
                    Strategy::Forward
                } else {
                    Strategy::Backward
                }
            }
            _ => self,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Backward => write!(f, "backward"),
            Strategy::Forward => write!(f, "forward"),
            Strategy::LoadAll => write!(f, "load-all"),
            Strategy::Auto => write!(f, "auto"),
        }
    }
}

/// The parameters of one search. Immutable for the life of the search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchRequest {
    /// Path of the file to search. Resolving a user-given name within a
    /// search directory is done by the caller, see
    /// [`process_path`](crate::readers::filepreprocessor::process_path).
    pub filename: FPath,
    /// Raw keyword, see [`MatchPredicate::new`].
    ///
    /// [`MatchPredicate::new`]: crate::data::predicate::MatchPredicate::new
    pub keyword: Option<String>,
    /// Maximum count of lines to return, `0` returns all matching lines.
    pub count: Count,
    /// Chunk size in bytes.
    pub chunksz: ChunkSz,
    pub strategy: Strategy,
}

impl SearchRequest {
    /// A request for all lines of `filename` with default settings.
    pub fn new(filename: &str) -> SearchRequest {
        SearchRequest {
            filename: FPath::from(filename),
            keyword: None,
            count: 0,
            chunksz: CHUNKSZ_DEF,
            strategy: Strategy::default(),
        }
    }

    pub fn with_keyword(mut self, keyword: &str) -> SearchRequest {
        self.keyword = Some(String::from(keyword));
        self
    }

    pub fn with_count(mut self, count: Count) -> SearchRequest {
        self.count = count;
        self
    }

    pub fn with_chunksz(mut self, chunksz: ChunkSz) -> SearchRequest {
        self.chunksz = chunksz;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> SearchRequest {
        self.strategy = strategy;
        self
    }

    /// Check the request arguments. Does not touch the filesystem.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.filename.is_empty() {
            return Err(SearchError::InvalidArgument(String::from("File name is mandatory.")));
        }
        if !(CHUNKSZ_MIN..=CHUNKSZ_MAX).contains(&self.chunksz) {
            return Err(SearchError::InvalidArgument(format!(
                "Chunk size {} is not within {} to {}",
                self.chunksz, CHUNKSZ_MIN, CHUNKSZ_MAX,
            )));
        }

        Ok(())
    }
}

/// Result of a successful search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Matching lines, most recent first.
    pub lines: Vec<String>,
    /// Statistics about the search.
    pub summary: SummarySearch,
}

/// The result of a search as the triple consumed by a request-handling
/// layer. An `error_code` of `0` signals success.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchResponse {
    pub error_code: i32,
    pub message: String,
    pub data: Vec<String>,
}

impl SearchResponse {
    pub fn from_result(result: Result<SearchResult, SearchError>) -> SearchResponse {
        match result {
            Ok(result) => SearchResponse {
                error_code: 0,
                message: String::from(MESSAGE_SUCCESS),
                data: result.lines,
            },
            Err(err) => SearchResponse {
                error_code: err.error_code(),
                message: err.to_string(),
                data: Vec::with_capacity(0),
            },
        }
    }

    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        self.error_code == 0
    }
}
