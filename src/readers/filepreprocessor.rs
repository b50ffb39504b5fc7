// src/readers/filepreprocessor.rs

//! Functions to resolve a user-passed file name within a search directory
//! before searching it.

use crate::common::{FPath, FileOpenOptions};
use crate::readers::helpers::path_to_fpath;

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Initial path processing return type.
#[derive(Debug, Eq, PartialEq)]
pub enum ProcessPathResult {
    /// File can be searched; holds the resolved path
    FileValid(FPath),
    /// Filesystem permissions do not allow reading the file
    FileErrNoPermissions(FPath),
    /// Path exists and is not a file
    FileErrNotAFile(FPath),
    /// Path does not exist
    FileErrNotExist(FPath),
    /// File name is absolute or would leave the search directory
    FileErrOutsideRoot(FPath),
}

/// Is `filename` a plain relative path that cannot leave its parent
/// directory?
fn is_contained(filename: &Path) -> bool {
    filename
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Resolve `filename` within directory `root`.
///
/// The `filename` must be relative and must not have `..` components.
/// The resolved path must be a readable regular file (or a symlink to one).
pub fn process_path(
    root: &FPath,
    filename: &FPath,
) -> ProcessPathResult {
    defn!("({:?}, {:?})", root, filename);

    let filename_std: &Path = Path::new(filename);
    if filename.is_empty() || !is_contained(filename_std) {
        defx!("return FileErrOutsideRoot");
        return ProcessPathResult::FileErrOutsideRoot(filename.clone());
    }
    let path_buf: PathBuf = Path::new(root).join(filename_std);
    let path: FPath = path_to_fpath(&path_buf);
    defo!("path {:?}", path);

    let metadata = match std::fs::metadata(&path_buf) {
        Ok(val) => val,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            defx!("return FileErrNoPermissions; {}", err);
            return ProcessPathResult::FileErrNoPermissions(path);
        }
        Err(_err) => {
            defx!("return FileErrNotExist; {}", _err);
            return ProcessPathResult::FileErrNotExist(path);
        }
    };
    if !metadata.is_file() {
        defx!("return FileErrNotAFile");
        return ProcessPathResult::FileErrNotAFile(path);
    }
    // the file is closed when dropped
    if let Err(err) = FileOpenOptions::new()
        .read(true)
        .open(&path_buf)
    {
        defx!("return {}", err);
        return match err.kind() {
            ErrorKind::NotFound => ProcessPathResult::FileErrNotExist(path),
            _ => ProcessPathResult::FileErrNoPermissions(path),
        };
    }
    defx!("return FileValid({:?})", path);

    ProcessPathResult::FileValid(path)
}
