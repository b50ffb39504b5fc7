// src/readers/mod.rs

//! "Readers" for _rlslib_.
//!
//! ## Overview of readers
//!
//! * A [`search`] picks a [`Strategy`] and drives one of the searchers.
//! * A [`ReverseSearcher`] drives a [`LineAssembler`] to derive [`Line`s].
//! * A `ReverseSearcher` drives a [`ChunkReader`] to derive chunks.
//! * A `ChunkReader` reads from a [`ByteSource`].
//!
//! <br/>
//!
//! * A `ChunkReader` and a `LineAssembler` only handle `u8` bytes.
//! * A `Line` is decoded to UTF-8 text only after it is fully assembled,
//!   never a part of a line.
//! * The searchers do all `u8` to `char` conversions.
//!
//! <br/>
//!
//! A [`ForwardSearcher`] and a [`LoadAllSearcher`] read the file from the
//! beginning. They return the same lines as a `ReverseSearcher`.
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Line`s]: crate::data::line::Line
//! [`Strategy`]: crate::data::request::Strategy
//! [`search`]: crate::readers::searchprocessor::search
//! [`ByteSource`]: crate::readers::bytesource::ByteSource
//! [`ChunkReader`]: crate::readers::chunkreader::ChunkReader
//! [`LineAssembler`]: crate::readers::lineassembler::LineAssembler
//! [`ReverseSearcher`]: crate::readers::reversesearcher::ReverseSearcher
//! [`ForwardSearcher`]: crate::readers::forwardsearcher::ForwardSearcher
//! [`LoadAllSearcher`]: crate::readers::forwardsearcher::LoadAllSearcher

pub mod bytesource;
pub mod chunkreader;
pub mod filelister;
pub mod filepreprocessor;
pub mod forwardsearcher;
pub mod helpers;
pub mod lineassembler;
pub mod reversesearcher;
pub mod searchprocessor;
pub mod summary;
