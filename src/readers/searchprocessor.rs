// src/readers/searchprocessor.rs

//! The public search functions [`search`] and [`search_with_canceller`],
//! and the [`Searcher`] trait implemented by each search strategy.
//!
//! [`search`]: crate::readers::searchprocessor::search
//! [`search_with_canceller`]: crate::readers::searchprocessor::search_with_canceller
//! [`Searcher`]: crate::readers::searchprocessor::Searcher

use crate::common::{Canceller, SearchError};
use crate::data::predicate::MatchPredicate;
use crate::data::request::{SearchRequest, SearchResult, Strategy};
use crate::readers::bytesource::{ByteSource, FileSource};
use crate::readers::forwardsearcher::{ForwardSearcher, LoadAllSearcher};
use crate::readers::reversesearcher::ReverseSearcher;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A search of one file, run once to completion.
pub trait Searcher {
    /// Run the search, consuming the `Searcher`.
    fn process(self) -> Result<SearchResult, SearchError>;
}

/// Search `request.filename` for the most recent lines matching
/// `request.keyword`.
///
/// See [`search_with_canceller`].
pub fn search(request: &SearchRequest) -> Result<SearchResult, SearchError> {
    search_with_canceller(request, &Canceller::new())
}

/// Search `request.filename` for the most recent lines matching
/// `request.keyword`, most recent first.
///
/// The request is validated before the file is opened. The file is opened
/// read-only for the duration of this call. The search may be abandoned
/// by raising the `canceller` from another thread.
pub fn search_with_canceller(
    request: &SearchRequest,
    canceller: &Canceller,
) -> Result<SearchResult, SearchError> {
    defn!("({:?})", request);
    if let Err(err) = request.validate() {
        defx!("validate() {}", err);
        return Err(err);
    }
    let source: FileSource = FileSource::open(&request.filename)?;
    let result = search_source(source, request, canceller);
    defx!("is_ok {}", result.is_ok());

    result
}

/// Search a [`ByteSource`] with the settings of `request`;
/// `request.filename` is ignored.
///
/// [`ByteSource`]: crate::readers::bytesource::ByteSource
pub fn search_source<S: ByteSource>(
    source: S,
    request: &SearchRequest,
    canceller: &Canceller,
) -> Result<SearchResult, SearchError> {
    request.validate()?;
    let predicate = MatchPredicate::new(request.keyword.as_deref());
    let strategy: Strategy = request
        .strategy
        .resolve(source.filesz(), request.count);
    defo!("strategy {:?} resolved to {:?}", request.strategy, strategy);

    match strategy {
        Strategy::Backward => {
            ReverseSearcher::new(source, predicate, request.count, request.chunksz, canceller.clone()).process()
        }
        Strategy::Forward => {
            ForwardSearcher::new(source, predicate, request.count, request.chunksz, canceller.clone()).process()
        }
        Strategy::LoadAll => {
            LoadAllSearcher::new(source, predicate, request.count, request.chunksz, canceller.clone()).process()
        }
        Strategy::Auto => {
            // `resolve` never returns `Auto`
            Err(SearchError::InvalidArgument(String::from("unresolved search strategy")))
        }
    }
}
