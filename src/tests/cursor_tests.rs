// src/tests/cursor_tests.rs

//! tests for `cursor.rs`

#![allow(non_snake_case)]

use crate::common::{FileOffset, FileSz};
use crate::data::cursor::Cursor;
use crate::readers::chunkreader::ChunkSz;

use ::test_case::test_case;

#[test]
fn test_Cursor_new() {
    let cursor = Cursor::new(100);
    assert_eq!(cursor.current_pos(), 100);
    assert_eq!(cursor.window_end_pos(), 100);
    assert_eq!(cursor.fileoffset_end(), 100);
    assert!(!cursor.is_start());
}

#[test]
fn test_Cursor_new_empty() {
    let cursor = Cursor::new(0);
    assert!(cursor.is_start());
    assert!(cursor.is_starting_edge(1));
}

#[test_case(100, 10, (90, 100))]
#[test_case(5, 10, (0, 5))]
#[test_case(10, 10, (0, 10))]
#[test_case(0, 10, (0, 0))]
#[test_case(1, 1, (0, 1))]
fn test_Cursor_next_window(
    filesz: FileSz,
    chunksz: ChunkSz,
    expect: (FileOffset, FileOffset),
) {
    let cursor = Cursor::new(filesz);
    assert_eq!(cursor.next_window(chunksz), expect);
}

#[test_case(100, 10, false)]
#[test_case(10, 10, false)]
#[test_case(9, 10, true)]
#[test_case(0, 10, true)]
fn test_Cursor_is_starting_edge(
    filesz: FileSz,
    chunksz: ChunkSz,
    expect: bool,
) {
    let cursor = Cursor::new(filesz);
    assert_eq!(cursor.is_starting_edge(chunksz), expect);
}

#[test]
fn test_Cursor_retreat_to() {
    let mut cursor = Cursor::new(25);
    let chunksz: ChunkSz = 10;
    let mut windows: Vec<(FileOffset, FileOffset)> = Vec::new();
    while !cursor.is_start() {
        let (beg, end) = cursor.next_window(chunksz);
        windows.push((beg, end));
        cursor.retreat_to(beg);
        assert_eq!(cursor.current_pos(), beg);
        assert_eq!(cursor.window_end_pos(), end);
        assert_eq!(cursor.fileoffset_end(), 25);
    }
    assert_eq!(windows, vec![(15, 25), (5, 15), (0, 5)]);
}

#[test]
#[should_panic]
fn test_Cursor_retreat_to_forward_panics() {
    let mut cursor = Cursor::new(25);
    cursor.retreat_to(10);
    cursor.retreat_to(11);
}
