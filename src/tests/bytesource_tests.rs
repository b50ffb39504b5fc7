// src/tests/bytesource_tests.rs

//! tests for `bytesource.rs`

#![allow(non_snake_case)]

use crate::common::{FPath, SearchError};
use crate::debug::helpers::{create_files_and_tmpdir, create_temp_file, ntf_fpath};
use crate::readers::bytesource::{ByteSource, BytesSource, FileSource};

#[test]
fn test_FileSource_open_read() {
    let ntf = create_temp_file("hello\nworld\n");
    let path: FPath = ntf_fpath(&ntf);
    let mut source = FileSource::open(&path).unwrap();
    assert_eq!(source.filesz(), 12);
    assert_eq!(source.path(), &path);
    let mut buffer = [0u8; 5];
    source.read_exact_at(6, &mut buffer).unwrap();
    assert_eq!(&buffer, b"world");
    source.read_exact_at(0, &mut buffer).unwrap();
    assert_eq!(&buffer, b"hello");
}

#[test]
fn test_FileSource_open_not_exist() {
    let path: FPath = FPath::from("/this/path/does/not/exist/rls-test.log");
    match FileSource::open(&path) {
        Err(SearchError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_FileSource_open_directory() {
    let (_tmpdir, fpaths) = create_files_and_tmpdir(&[("subdir/", &b""[..])]);
    match FileSource::open(&fpaths[0]) {
        Err(SearchError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_BytesSource_read() {
    let mut source = BytesSource::new("mem", b"abcdef".to_vec());
    assert_eq!(source.filesz(), 6);
    assert_eq!(source.path(), "mem");
    let mut buffer = [0u8; 3];
    source.read_exact_at(3, &mut buffer).unwrap();
    assert_eq!(&buffer, b"def");
}

#[test]
fn test_BytesSource_read_past_end() {
    let mut source = BytesSource::new("mem", b"abc".to_vec());
    let mut buffer = [0u8; 3];
    assert!(source.read_exact_at(1, &mut buffer).is_err());
}
