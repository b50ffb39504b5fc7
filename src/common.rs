// src/common.rs

//! Common imports, type aliases, error types, and other globals for
//! _rlslib_ (avoids circular imports).

use std::fmt;
use std::io::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FileMetadata = std::fs::Metadata;
pub type FileOpenOptions = std::fs::OpenOptions;

/// File size in bytes
pub type FileSz = u64;

/// Offset into a file in bytes
pub type FileOffset = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// General counting type
pub type Count = u64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Single-byte newLine char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;
/// Newline in a byte buffer
#[allow(non_upper_case_globals)]
pub const NLu8a: [u8; 1] = [NLu8];
/// Carriage return as u8, stripped from the end of CRLF lines
#[allow(non_upper_case_globals)]
pub const CRu8: u8 = 13;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for chunk reading functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended
/// for chunk reading functions
#[derive(Debug, PartialEq)]
pub enum ResultS3<T, E> {
    /// Contains the success data
    Found(T),
    /// Nothing left to read (start of file or end of file was reached),
    /// no errors happened
    Done,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultS3<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: ResultS3::Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultS3::Found(_))
    }

    /// Returns `true` if the result is [`Done`].
    ///
    /// [`Done`]: ResultS3::Done
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultS3::Done)
    }

    /// Returns `true` if the result is [`Err`].
    ///
    /// [`Err`]: ResultS3::Err
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultS3::Err(_))
    }
}

impl<T, E> fmt::Display for ResultS3<T, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultS3::Found(_) => { write!(f, "ResultS3::Found") },
            ResultS3::Done => { write!(f, "ResultS3::Done") },
            ResultS3::Err(err) => { write!(f, "ResultS3::Err({})", err) },
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// search errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Failure of an entire search.
///
/// Partial results gathered before the failure are discarded; a search
/// either returns all of its result or one of these.
#[derive(Debug)]
pub enum SearchError {
    /// Target path does not exist or is not a regular file.
    /// Returned before any read is attempted.
    NotFound(FPath),
    /// Missing file name, or an out-of-range chunk size.
    InvalidArgument(String),
    /// A read or seek error during the search.
    IOFailure(FPath, Error),
    /// The bytes of a fully assembled line are not valid UTF-8.
    /// `fileoffset` is the offset of the first byte of that line.
    DecodeFailure {
        path: FPath,
        fileoffset: FileOffset,
    },
    /// The search was abandoned via a [`Canceller`].
    Cancelled,
}

impl SearchError {
    /// The `error_code` of a [`SearchResponse`] for this error.
    /// Values for `NotFound` and `InvalidArgument` are the values the log
    /// viewer front end expects.
    ///
    /// [`SearchResponse`]: crate::data::request::SearchResponse
    pub const fn error_code(&self) -> i32 {
        match self {
            SearchError::NotFound(_) => -1,
            SearchError::InvalidArgument(_) => 1,
            SearchError::IOFailure(_, _) => 2,
            SearchError::DecodeFailure { .. } => 3,
            SearchError::Cancelled => 4,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NotFound(path) => {
                write!(f, "File does not exist. {:?}", path)
            }
            SearchError::InvalidArgument(message) => {
                write!(f, "{}", message)
            }
            SearchError::IOFailure(path, err) => {
                write!(f, "Failed reading {:?}: {}", path, err)
            }
            SearchError::DecodeFailure { path, fileoffset } => {
                write!(f, "Line at byte offset {} of {:?} is not valid UTF-8", fileoffset, path)
            }
            SearchError::Cancelled => {
                write!(f, "Search cancelled")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::IOFailure(_, err) => Some(err),
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// cancellation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// External cancellation signal for a search.
///
/// Clones share the same flag. A search polls the flag before each chunk
/// read and returns [`SearchError::Cancelled`] once it is raised.
#[derive(Clone, Debug, Default)]
pub struct Canceller {
    flag: Arc<AtomicBool>,
}

impl Canceller {
    pub fn new() -> Canceller {
        Canceller::default()
    }

    /// Raise the flag. All clones observe it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
