// src/tests/filelister_tests.rs

//! tests for `filelister.rs` functions

#![allow(non_snake_case)]

use crate::common::{FPath, FileSz};
use crate::debug::helpers::{create_files_and_tmpdir, TempDir};
use crate::readers::filelister::{
    filesz_to_human,
    list_all,
    list_files_only,
    EntryType,
    ListEntry,
    FOLDER_BYTE_SIZE,
};
use crate::readers::helpers::path_to_fpath;

use ::test_case::test_case;

#[test_case(0, "0.0 KB")]
#[test_case(999, "1.0 KB")]
#[test_case(1000, "1.0 KB")]
#[test_case(1234, "1.23 KB")]
#[test_case(499_999, "500.0 KB")]
#[test_case(500_000, "0.5 MB")]
#[test_case(1_500_000, "1.5 MB")]
#[test_case(499_999_999, "500.0 MB")]
#[test_case(500_000_000, "0.5 GB")]
#[test_case(12_345_678_901, "12.35 GB")]
fn test_filesz_to_human(filesz: FileSz, expect: &str) {
    assert_eq!(filesz_to_human(filesz), expect);
}

fn new_root() -> (TempDir, FPath) {
    let (tmpdir, _fpaths) = create_files_and_tmpdir(&[
        ("b.log", &b"0123456789"[..]),
        ("a.txt", &b"abc"[..]),
        ("zero.log", &b""[..]),
        ("skip.gz", &b"12345"[..]),
        ("sub/", &b""[..]),
    ]);
    let root: FPath = path_to_fpath(tmpdir.path());

    (tmpdir, root)
}

#[test]
fn test_list_files_only() {
    let (_tmpdir, root) = new_root();
    let names: Vec<FPath> = list_files_only(&root).unwrap();
    assert_eq!(names, vec!["a.txt", "b.log", "skip.gz", "zero.log"]);
}

#[test]
fn test_list_all() {
    let (_tmpdir, root) = new_root();
    let listing: Vec<ListEntry> = list_all(&root, &[String::from("gz")]).unwrap();
    let names: Vec<&str> = listing
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.log", "sub"]);

    assert_eq!(
        listing[0],
        ListEntry {
            entry_type: EntryType::File,
            name: FPath::from("a.txt"),
            size: Some(String::from("0.0 KB")),
            byte_size: 3,
            extension: Some(String::from("txt")),
            read_access: Some(true),
        }
    );
    assert_eq!(listing[1].size.as_deref(), Some("0.01 KB"));
    assert_eq!(listing[2].entry_type, EntryType::Folder);
    assert_eq!(listing[2].byte_size, FOLDER_BYTE_SIZE);
    assert_eq!(listing[2].size, None);
    assert_eq!(listing[2].entry_type.to_string(), "folder");
}

#[test]
fn test_list_all_no_exclusions() {
    let (_tmpdir, root) = new_root();
    let listing: Vec<ListEntry> = list_all(&root, &[]).unwrap();
    let names: Vec<&str> = listing
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    // zero size files are never listed
    assert_eq!(names, vec!["a.txt", "skip.gz", "b.log", "sub"]);
}

#[test]
fn test_list_root_not_exist() {
    let root = FPath::from("/this/rls/root/does/not/exist");
    assert!(list_files_only(&root).is_err());
    assert!(list_all(&root, &[]).is_err());
}
