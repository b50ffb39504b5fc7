// src/readers/bytesource.rs

//! Implements the [`ByteSource`] trait, a read-only random-access view of
//! bytes, and it's implementations [`FileSource`] and [`BytesSource`].
//!
//! [`ByteSource`]: crate::readers::bytesource::ByteSource
//! [`FileSource`]: crate::readers::bytesource::FileSource
//! [`BytesSource`]: crate::readers::bytesource::BytesSource

use crate::common::{
    Bytes,
    FPath,
    File,
    FileMetadata,
    FileOffset,
    FileOpenOptions,
    FileSz,
    SearchError,
};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

use std::fmt;
use std::io::prelude::Read;
use std::io::{Error, ErrorKind, Result, Seek, SeekFrom};
use std::path::Path;

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A read-only, random-access view of a sequence of bytes.
///
/// The size is captured when the `ByteSource` is created; later growth of
/// an underlying file is not seen.
///
/// Only one reader may use a `ByteSource` at a time (reads take
/// `&mut self`).
pub trait ByteSource {
    /// Path of the underlying file, used in messages.
    fn path(&self) -> &FPath;

    /// Size in bytes, captured at creation.
    fn filesz(&self) -> FileSz;

    /// Fill `buffer` with the bytes at `fileoffset`.
    ///
    /// The range `[fileoffset, fileoffset + buffer.len())` must be within
    /// `filesz()`; a shorter underlying file is an error.
    fn read_exact_at(
        &mut self,
        fileoffset: FileOffset,
        buffer: &mut [u8],
    ) -> Result<()>;
}

/// A [`ByteSource`] for a regular file opened read-only.
///
/// The file handle is closed when the `FileSource` is dropped.
pub struct FileSource {
    path: FPath,
    file: File,
    filesz: FileSz,
}

impl fmt::Debug for FileSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("FileSource")
            .field("path", &self.path)
            .field("filesz", &self.filesz)
            .finish()
    }
}

impl FileSource {
    /// Open the regular file at `path` for reading.
    ///
    /// Returns [`SearchError::NotFound`] if `path` does not exist or is not
    /// a regular file, [`SearchError::IOFailure`] for other errors.
    pub fn open(path: &FPath) -> std::result::Result<FileSource, SearchError> {
        defn!("({:?})", path);
        let path_std: &Path = Path::new(path);
        match std::fs::metadata(path_std) {
            Ok(metadata) => {
                if !metadata.is_file() {
                    defx!("return NotFound; not a file");
                    return Err(SearchError::NotFound(path.clone()));
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                defx!("return NotFound; {}", err);
                return Err(SearchError::NotFound(path.clone()));
            }
            Err(err) => {
                defx!("return IOFailure; {}", err);
                return Err(SearchError::IOFailure(path.clone(), err));
            }
        }

        let mut open_options = FileOpenOptions::new();
        defo!("open_options.read(true).open({:?})", path);
        let file: File = match open_options
            .read(true)
            .open(path_std)
        {
            Ok(val) => val,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                defx!("return NotFound; {}", err);
                return Err(SearchError::NotFound(path.clone()));
            }
            Err(err) => {
                defx!("return IOFailure; {}", err);
                return Err(SearchError::IOFailure(path.clone(), err));
            }
        };
        let metadata: FileMetadata = match file.metadata() {
            Ok(val) => val,
            Err(err) => {
                defx!("file.metadata() failed; return IOFailure; {}", err);
                return Err(SearchError::IOFailure(path.clone(), err));
            }
        };
        let filesz: FileSz = metadata.len();
        defx!("return FileSource filesz {}", filesz);

        Ok(FileSource {
            path: path.clone(),
            file,
            filesz,
        })
    }
}

impl ByteSource for FileSource {
    #[inline(always)]
    fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    fn filesz(&self) -> FileSz {
        self.filesz
    }

    fn read_exact_at(
        &mut self,
        fileoffset: FileOffset,
        buffer: &mut [u8],
    ) -> Result<()> {
        defn!("({}, buffer len {})", fileoffset, buffer.len());
        debug_assert_le!(fileoffset + buffer.len() as FileOffset, self.filesz, "read past captured file size");
        if let Err(err) = self.file.seek(SeekFrom::Start(fileoffset)) {
            de_err!("file.seek(Start({})) {:?} {}", fileoffset, self.path, err);
            defx!("return Err({})", err);
            return Err(err);
        }
        if let Err(err) = self.file.read_exact(buffer) {
            de_err!("file.read_exact(buffer len {}) {:?} {}", buffer.len(), self.path, err);
            defx!("return Err({})", err);
            return Err(err);
        }
        defx!();

        Ok(())
    }
}

/// A [`ByteSource`] of bytes held in memory.
#[derive(Debug)]
pub struct BytesSource {
    path: FPath,
    bytes: Bytes,
}

impl BytesSource {
    /// `path` is only used in messages.
    pub fn new(
        path: &str,
        bytes: Bytes,
    ) -> BytesSource {
        BytesSource {
            path: FPath::from(path),
            bytes,
        }
    }
}

impl ByteSource for BytesSource {
    #[inline(always)]
    fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    fn filesz(&self) -> FileSz {
        self.bytes.len() as FileSz
    }

    fn read_exact_at(
        &mut self,
        fileoffset: FileOffset,
        buffer: &mut [u8],
    ) -> Result<()> {
        let beg: usize = fileoffset as usize;
        let end: usize = beg + buffer.len();
        if end > self.bytes.len() {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                format!("read [{}, {}) past end {}", beg, end, self.bytes.len()),
            ));
        }
        buffer.copy_from_slice(&self.bytes[beg..end]);

        Ok(())
    }
}
