// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;

use crate::readers::helpers::path_to_fpath;

use std::fs::{create_dir, File};
use std::io::Write; // for `NamedTempFile.write_all`
use std::path::PathBuf;

use ::lazy_static::lazy_static;
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
/// Eases cleanup of temporary files remaining after testing.
/// See <https://github.com/Stebalien/tempfile/issues/183>.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-rls-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
    static ref STRING_TEMPFILE_SUFFIX: String = String::from("");
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `[u8]` to a specially-named
/// temporary file.
///
/// `rand_len` is the string length of a random character sequence
pub fn create_temp_file_with_name_rlen(
    data: &[u8],
    prefix: Option<&String>,
    suffix: Option<&String>,
    rand_len: usize,
) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        .prefix::<str>(
            prefix
                .unwrap_or(&STRING_TEMPFILE_PREFIX)
                .as_ref(),
        )
        .suffix::<str>(
            suffix
                .unwrap_or(&STRING_TEMPFILE_SUFFIX)
                .as_ref(),
        )
        .rand_bytes(rand_len)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    match ntf.flush() {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::flush() return Err {}", err);
        }
    }

    ntf
}

/// Testing helper function to write a `str` to a temporary file.
///
/// BUG: `NamedTempFile` created within `lazy_static` will fail to remove itself
///      <https://github.com/Stebalien/tempfile/issues/183>.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_with_name_rlen(data.as_bytes(), None, None, 5)
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    defñ!();
    ::tempfile::tempdir().unwrap()
}

/// Testing helper function to write `data` to file `name` within `tempdir`.
/// A `name` ending with `/` creates a directory instead.
/// Returns the path of the created file or directory.
pub fn create_file_bytes_name_in_tmpdir(
    data: &[u8],
    name: &str,
    tempdir: &TempDir,
) -> FPath {
    let path_new: PathBuf = tempdir.path().join(name.trim_end_matches('/'));
    if name.ends_with('/') {
        defo!("create_dir({:?})", path_new);
        create_dir(&path_new).unwrap();
        return path_to_fpath(&path_new);
    }
    defo!("File::create({:?})", path_new);
    let mut file_ = match File::create(&path_new) {
        Ok(f) => f,
        Err(err) => panic!("Error {:?}", err),
    };
    file_.write_all(data).unwrap();

    path_to_fpath(&path_new)
}

/// Testing helper to create a `TempDir` and files (or directories) with
/// the passed names and contents.
pub fn create_files_and_tmpdir(entries: &[(&str, &[u8])]) -> (TempDir, Vec<FPath>) {
    let tmpdir = create_temp_dir();
    let mut fpaths = Vec::<FPath>::with_capacity(entries.len());

    for (name, data) in entries.iter() {
        fpaths.push(create_file_bytes_name_in_tmpdir(data, name, &tmpdir));
    }

    (tmpdir, fpaths)
}
