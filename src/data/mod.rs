// src/data/mod.rs

//! The `data` module is specialized data containers for a search:
//! [`Line`]s, the [`Cursor`], the [`MatchPredicate`], the collectors of
//! matching lines, and the [`SearchRequest`] and its results.
//!
//! ## Definitions of data
//!
//! ### Chunk
//!
//! A "chunk" is a sequence of contiguous bytes in a file that:
//!
//! * is read in one backward step of a search.
//! * has the configured chunk size, except the chunk nearest the start of
//!   the file which may be smaller.
//!
//! A "chunk" is read by a [`ChunkReader`].
//!
//! ### Line
//!
//! A "line" is a sequence of bytes that:
//!
//! * begins after a prior line terminator `'\n'` or the beginning of the
//!   file.
//! * ends before a line terminator `'\n'` or the end of the file.
//!
//! A line may straddle any number of chunks. A "line" is represented by a
//! [`Line`] and assembled by a [`LineAssembler`]. A line is decoded to text
//! only after it is fully assembled.
//!
//! ### Pending tail
//!
//! Bytes of a line that is not yet fully assembled because the chunks
//! read so far do not include the line terminator preceding it.
//!
//! [`Line`]: crate::data::line::Line
//! [`Cursor`]: crate::data::cursor::Cursor
//! [`MatchPredicate`]: crate::data::predicate::MatchPredicate
//! [`SearchRequest`]: crate::data::request::SearchRequest
//! [`ChunkReader`]: crate::readers::chunkreader::ChunkReader
//! [`LineAssembler`]: crate::readers::lineassembler::LineAssembler

pub mod collector;
pub mod cursor;
pub mod line;
pub mod predicate;
pub mod request;
