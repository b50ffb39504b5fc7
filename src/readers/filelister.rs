// src/readers/filelister.rs

//! Functions to list the entries of a search directory.
//!
//! [`list_files_only`] returns the names of the files.
//! [`list_all`] returns a [`ListEntry`] for each file and directory.
//!
//! [`list_files_only`]: crate::readers::filelister::list_files_only
//! [`list_all`]: crate::readers::filelister::list_all
//! [`ListEntry`]: crate::readers::filelister::ListEntry

use crate::common::{FPath, FileOpenOptions, FileSz};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::helpers::name_extension;

use std::fmt;
use std::io::Result;
use std::path::Path;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir::{DirEntry, WalkDir};

/// `byte_size` of a directory entry; sorts directories after files.
pub const FOLDER_BYTE_SIZE: FileSz = 999_999_999_999_999;

/// Files smaller than this are sized in kilobytes.
pub const FILESZ_KB_MAX: FileSz = 500_000;

/// Files smaller than this are sized in megabytes, otherwise gigabytes.
pub const FILESZ_MB_MAX: FileSz = 500_000_000;

/// Type of a [`ListEntry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryType {
    File,
    Folder,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::File => write!(f, "file"),
            EntryType::Folder => write!(f, "folder"),
        }
    }
}

/// One entry of a search directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListEntry {
    pub entry_type: EntryType,
    /// File name, without the directory.
    pub name: FPath,
    /// Human-readable size; `None` for a folder.
    pub size: Option<String>,
    /// Size in bytes; [`FOLDER_BYTE_SIZE`] for a folder.
    pub byte_size: FileSz,
    /// See [`name_extension`]; `None` for a folder.
    ///
    /// [`name_extension`]: crate::readers::helpers::name_extension
    pub extension: Option<String>,
    /// The file can be opened for reading; `None` for a folder.
    pub read_access: Option<bool>,
}

/// Decimal size text of `filesz` bytes, e.g. `"1.23 KB"`, rounded to two
/// places without trailing zeros beyond the first decimal place.
pub fn filesz_to_human(filesz: FileSz) -> String {
    let (divisor, unit): (f64, &str) = if filesz < FILESZ_KB_MAX {
        (1_000.0, "KB")
    } else if filesz < FILESZ_MB_MAX {
        (1_000_000.0, "MB")
    } else {
        (1_000_000_000.0, "GB")
    };
    let value: f64 = ((filesz as f64 / divisor) * 100.0).round() / 100.0;

    // `{:?}` of a float always prints a decimal place, e.g. `1.0`
    format!("{:?} {}", value, unit)
}

/// Entries directly within `root`, sorted by name.
fn read_root(root: &FPath) -> Result<Vec<DirEntry>> {
    defn!("({:?})", root);
    let mut entries: Vec<DirEntry> = Vec::new();
    for entry in WalkDir::new(root.as_str())
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(val) => entries.push(val),
            Err(err) => {
                // the root itself failed
                if err.depth() == 0 {
                    defx!("return Err({})", err);
                    return Err(err.into());
                }
                de_wrn!("skip entry of {:?}: {}", root, err);
            }
        }
    }
    defx!("return {} entries", entries.len());

    Ok(entries)
}

fn entry_name(entry: &DirEntry) -> FPath {
    entry
        .file_name()
        .to_string_lossy()
        .to_string()
}

/// Names of the regular files directly within directory `root`, sorted by
/// name. Sub-directories are not entered.
pub fn list_files_only(root: &FPath) -> Result<Vec<FPath>> {
    defn!("({:?})", root);
    let names: Vec<FPath> = read_root(root)?
        .iter()
        .filter(|entry| entry.file_type().is_file())
        .map(entry_name)
        .collect();
    defx!("return {:?}", names);

    Ok(names)
}

/// Entries directly within directory `root`, sorted by `byte_size`.
///
/// Files with a zero size or with an extension in `exclude_exts` are
/// skipped. Folders are always listed.
pub fn list_all(
    root: &FPath,
    exclude_exts: &[String],
) -> Result<Vec<ListEntry>> {
    defn!("({:?}, {:?})", root, exclude_exts);
    let mut listing: Vec<ListEntry> = Vec::new();
    for entry in read_root(root)?.iter() {
        let name: FPath = entry_name(entry);
        if entry.file_type().is_dir() {
            listing.push(ListEntry {
                entry_type: EntryType::Folder,
                name,
                size: None,
                byte_size: FOLDER_BYTE_SIZE,
                extension: None,
                read_access: None,
            });
            continue;
        }
        if !entry.file_type().is_file() {
            defo!("skip {:?}; not a file nor directory", name);
            continue;
        }
        let byte_size: FileSz = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(_err) => {
                de_wrn!("metadata of {:?}: {}", entry.path(), _err);
                continue;
            }
        };
        let extension: &str = name_extension(&name);
        if byte_size == 0 || exclude_exts.iter().any(|ext| ext == extension) {
            defo!("skip {:?}; size {} extension {:?}", name, byte_size, extension);
            continue;
        }
        let read_access: bool = is_readable(entry.path());
        listing.push(ListEntry {
            entry_type: EntryType::File,
            size: Some(filesz_to_human(byte_size)),
            byte_size,
            extension: Some(String::from(extension)),
            read_access: Some(read_access),
            name,
        });
    }
    // stable sort; equal sizes stay in name order
    listing.sort_by_key(|entry| entry.byte_size);
    defx!("return {} entries", listing.len());

    Ok(listing)
}

/// The file at `path` can be opened for reading.
fn is_readable(path: &Path) -> bool {
    FileOpenOptions::new()
        .read(true)
        .open(path)
        .is_ok()
}
