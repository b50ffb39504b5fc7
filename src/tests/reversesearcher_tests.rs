// src/tests/reversesearcher_tests.rs

//! tests for `reversesearcher.rs`

#![allow(non_snake_case)]

use crate::common::{Canceller, Count, FPath, FileOffset, FileSz, SearchError};
use crate::data::predicate::MatchPredicate;
use crate::data::request::SearchResult;
use crate::readers::bytesource::{ByteSource, BytesSource};
use crate::readers::chunkreader::ChunkSz;
use crate::readers::reversesearcher::{ReverseSearcher, SearchStage};
use crate::readers::searchprocessor::Searcher;
use crate::tests::common::{
    expected_lines,
    random_log,
    FailingSource,
    DATA_ABCD,
    DATA_BASIC_10,
    DATA_BASIC_10_REV,
};

use std::io::ErrorKind;

use ::more_asserts::{assert_gt, assert_lt};
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `ByteSource` that raises a `Canceller` during the first read.
struct CancellingSource {
    inner: BytesSource,
    canceller: Canceller,
}

impl ByteSource for CancellingSource {
    fn path(&self) -> &FPath {
        self.inner.path()
    }

    fn filesz(&self) -> FileSz {
        self.inner.filesz()
    }

    fn read_exact_at(
        &mut self,
        fileoffset: FileOffset,
        buffer: &mut [u8],
    ) -> std::io::Result<()> {
        self.canceller.cancel();
        self.inner.read_exact_at(fileoffset, buffer)
    }
}

fn search_bytes(
    data: &[u8],
    keyword: Option<&str>,
    count: Count,
    chunksz: ChunkSz,
) -> Result<SearchResult, SearchError> {
    let source = BytesSource::new("test", data.to_vec());
    ReverseSearcher::new(source, MatchPredicate::new(keyword), count, chunksz, Canceller::new()).process()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| String::from(*s)).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(Some("keyword"), 1, &["d keyword"]; "keyword count1")]
#[test_case(Some("keyword"), 2, &["d keyword", "b keyword"]; "keyword count2")]
#[test_case(Some("keyword"), 0, &["d keyword", "b keyword"]; "keyword count0")]
#[test_case(Some("KEYWORD"), 5, &["d keyword", "b keyword"]; "uppercase keyword")]
#[test_case(None, 0, &["d keyword", "c", "b keyword", "a"]; "no keyword")]
#[test_case(None, 3, &["d keyword", "c", "b keyword"]; "no keyword count3")]
#[test_case(Some("nothing"), 3, &[]; "no match")]
fn test_ReverseSearcher_abcd(
    keyword: Option<&str>,
    count: Count,
    expect: &[&str],
) {
    for chunksz in [1, 2, 3, 5, 16, 100, 1_000_000] {
        let result = search_bytes(DATA_ABCD.as_bytes(), keyword, count, chunksz).unwrap();
        assert_eq!(result.lines, strings(expect), "chunksz {}", chunksz);
    }
}

/// a trailing line terminator must not add an empty line or drop the last
/// line
#[test_case("x\ny\n", &["y", "x"]; "trailing newline")]
#[test_case("x\ny", &["y", "x"]; "no trailing newline")]
#[test_case("x\ny\n\n\n", &["y", "x"]; "trailing newlines")]
#[test_case("\n\nx\n\ny", &["y", "x"]; "empty lines")]
#[test_case("x\r\ny\r\n", &["y", "x"]; "CRLF")]
#[test_case("", &[]; "empty file")]
#[test_case("\n", &[]; "only newline")]
fn test_ReverseSearcher_boundaries(
    data: &str,
    expect: &[&str],
) {
    for chunksz in [1, 2, 3, 16, 100, 1_000_000] {
        let result = search_bytes(data.as_bytes(), None, 0, chunksz).unwrap();
        assert_eq!(result.lines, strings(expect), "chunksz {} data {:?}", chunksz, data);
    }
}

#[test_case(1)]
#[test_case(16)]
#[test_case(100)]
#[test_case(1_000_000)]
fn test_ReverseSearcher_basic10_chunksz(chunksz: ChunkSz) {
    let result = search_bytes(DATA_BASIC_10.as_bytes(), None, 0, chunksz).unwrap();
    assert_eq!(result.lines, strings(&DATA_BASIC_10_REV));

    let result = search_bytes(DATA_BASIC_10.as_bytes(), Some("error AND disk"), 0, chunksz).unwrap();
    assert_eq!(
        result.lines,
        strings(&[
            "2000-01-01 00:00:10 ERROR disk full",
            "2000-01-01 00:00:07 error Disk write failed",
            "2000-01-01 00:00:03 ERROR disk read failed",
        ])
    );

    let result = search_bytes(DATA_BASIC_10.as_bytes(), Some("two AND denmark"), 0, chunksz).unwrap();
    assert_eq!(result.lines, strings(&["2000-01-01 00:00:08 INFO two AND denmark"]));
}

/// a search for few recent lines of a large file reads only the end of it
#[test]
fn test_ReverseSearcher_early_termination() {
    let mut data = String::new();
    for i in 0..10_000 {
        data.push_str(&format!("line {} of the log\n", i));
    }
    let result = search_bytes(data.as_bytes(), Some("log"), 3, 100).unwrap();
    assert_eq!(
        result.lines,
        strings(&["line 9999 of the log", "line 9998 of the log", "line 9997 of the log"])
    );
    let summary = result.summary;
    assert!(summary.is_early_termination());
    assert_lt!(summary.bytes_read, 1_000);
    assert_eq!(summary.filesz, data.len() as FileSz);
    assert_eq!(summary.lines_matched, 3);
    assert_eq!(summary.stage_last, Some(SearchStage::Scanning));
}

#[test]
fn test_ReverseSearcher_full_scan_reaches_starting_edge() {
    let result = search_bytes(DATA_BASIC_10.as_bytes(), Some("error"), 0, 16).unwrap();
    assert_eq!(result.lines.len(), 4);
    assert_eq!(result.summary.bytes_read, DATA_BASIC_10.len() as Count);
    assert_eq!(result.summary.stage_last, Some(SearchStage::StartingEdge));
    assert!(!result.summary.is_early_termination());
}

#[test]
fn test_ReverseSearcher_random_vs_expected() {
    for seed in 0..8 {
        let data: String = random_log(seed, 200);
        for (keyword, terms) in [
            (None, vec![]),
            (Some("error"), vec!["error"]),
            (Some("disk AND two"), vec!["disk", "two"]),
            (Some("ÉTÉ"), vec!["été"]),
        ] {
            for count in [0, 1, 7, 500] {
                let expect = expected_lines(&data, &terms, count);
                for chunksz in [1, 13, 100, 4096] {
                    let result = search_bytes(data.as_bytes(), keyword, count as Count, chunksz).unwrap();
                    assert_eq!(
                        result.lines, expect,
                        "seed {} keyword {:?} count {} chunksz {}", seed, keyword, count, chunksz
                    );
                }
            }
        }
    }
}

#[test]
fn test_ReverseSearcher_decode_failure() {
    let data: Vec<u8> = b"good\nbad \xFF\xFE line\ngood again\n".to_vec();
    match search_bytes(&data, None, 0, 4) {
        Err(SearchError::DecodeFailure { path, fileoffset }) => {
            assert_eq!(path, "test");
            assert_eq!(fileoffset, 5);
        }
        other => panic!("expected DecodeFailure, got {:?}", other),
    }
    // enough lines found before the bad line
    let result = search_bytes(&data, None, 1, 4).unwrap();
    assert_eq!(result.lines, strings(&["good again"]));
}

#[test]
fn test_ReverseSearcher_io_failure() {
    let data: String = DATA_BASIC_10.repeat(10);
    let source = FailingSource::new("failing", data.into_bytes(), 2);
    let result = ReverseSearcher::new(source, MatchPredicate::new(None), 0, 50, Canceller::new()).process();
    match result {
        Err(SearchError::IOFailure(path, err)) => {
            assert_eq!(path, "failing");
            assert_eq!(err.kind(), ErrorKind::Other);
        }
        other => panic!("expected IOFailure, got {:?}", other),
    }
}

#[test]
fn test_ReverseSearcher_cancelled_before_start() {
    let canceller = Canceller::new();
    canceller.cancel();
    let source = BytesSource::new("test", DATA_BASIC_10.as_bytes().to_vec());
    let result = ReverseSearcher::new(source, MatchPredicate::new(None), 0, 16, canceller).process();
    assert!(matches!(result, Err(SearchError::Cancelled)), "{:?}", result);
}

#[test]
fn test_ReverseSearcher_cancelled_mid_scan() {
    let canceller = Canceller::new();
    let source = CancellingSource {
        inner: BytesSource::new("test", DATA_BASIC_10.as_bytes().to_vec()),
        canceller: canceller.clone(),
    };
    let result = ReverseSearcher::new(source, MatchPredicate::new(None), 0, 16, canceller.clone()).process();
    assert!(matches!(result, Err(SearchError::Cancelled)), "{:?}", result);
    assert!(canceller.is_cancelled());
}

#[test]
fn test_ReverseSearcher_stage() {
    let source = BytesSource::new("test", DATA_ABCD.as_bytes().to_vec());
    let searcher = ReverseSearcher::new(source, MatchPredicate::new(None), 0, 4, Canceller::new());
    assert_eq!(searcher.stage(), SearchStage::Scanning);
    assert_eq!(searcher.cursor().current_pos(), DATA_ABCD.len() as FileOffset);
    let result = searcher.process().unwrap();
    assert_gt!(result.summary.chunks_read, 1);
}
