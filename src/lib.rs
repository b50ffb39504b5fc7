// src/lib.rs

//! _rlslib_ is the library of the Reverse Log Searcher, driven by the
//! binary program _rlsearch_.
//!
//! Given a large, append-only, line-oriented text file, _rlslib_ returns the
//! most recent _N_ lines satisfying a keyword predicate. The file is read
//! backwards in fixed-size chunks and reading stops as soon as enough
//! matching lines are found. For a small _N_ and recent matches the cost
//! of a search is proportional to the bytes near the end of the file, not
//! to the file size.
//!
//! ## Overview
//!
//! * A [`search`] call validates a [`SearchRequest`], opens the file, and
//!   hands it to one of the search [`Strategy`]s.
//! * The default strategy is driven by a [`ReverseSearcher`].
//! * A `ReverseSearcher` drives a [`ChunkReader`] and a [`LineAssembler`] to
//!   derive lines, tests each line with a [`MatchPredicate`], and keeps
//!   matches in a [`BoundedCollector`].
//! * A `ChunkReader` reads bytes from a [`ByteSource`].
//!
//! The remaining modules are helpers for the _rlsearch_ program: resolving
//! a file name within a search directory, listing a search directory, and
//! printing results.
//!
//! [`search`]: crate::readers::searchprocessor::search
//! [`SearchRequest`]: crate::data::request::SearchRequest
//! [`Strategy`]: crate::data::request::Strategy
//! [`ReverseSearcher`]: crate::readers::reversesearcher::ReverseSearcher
//! [`ChunkReader`]: crate::readers::chunkreader::ChunkReader
//! [`LineAssembler`]: crate::readers::lineassembler::LineAssembler
//! [`MatchPredicate`]: crate::data::predicate::MatchPredicate
//! [`BoundedCollector`]: crate::data::collector::BoundedCollector
//! [`ByteSource`]: crate::readers::bytesource::ByteSource

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
