// src/tests/common.rs

//! Common data and helpers for tests.

#![allow(non_upper_case_globals)]

use crate::common::{FPath, FileOffset, FileSz};
use crate::debug::helpers::{create_temp_file, ntf_fpath, NamedTempFile};
use crate::readers::bytesource::{ByteSource, BytesSource};

use std::io::{Error, ErrorKind};

use ::lazy_static::lazy_static;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// data
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const DATA_EMPTY: &str = "";

/// four lines, two with `keyword`
pub const DATA_ABCD: &str = "a\nb keyword\nc\nd keyword\n";

pub const DATA_BASIC_10: &str = "\
2000-01-01 00:00:01 INFO service started
2000-01-01 00:00:02 INFO disk mounted
2000-01-01 00:00:03 ERROR disk read failed
2000-01-01 00:00:04 WARN retrying
2000-01-01 00:00:05 ERROR network unreachable
2000-01-01 00:00:06 INFO disk remounted
2000-01-01 00:00:07 error Disk write failed
2000-01-01 00:00:08 INFO two AND denmark
2000-01-01 00:00:09 INFO done
2000-01-01 00:00:10 ERROR disk full
";

/// `DATA_BASIC_10` lines, most recent first
pub const DATA_BASIC_10_REV: [&str; 10] = [
    "2000-01-01 00:00:10 ERROR disk full",
    "2000-01-01 00:00:09 INFO done",
    "2000-01-01 00:00:08 INFO two AND denmark",
    "2000-01-01 00:00:07 error Disk write failed",
    "2000-01-01 00:00:06 INFO disk remounted",
    "2000-01-01 00:00:05 ERROR network unreachable",
    "2000-01-01 00:00:04 WARN retrying",
    "2000-01-01 00:00:03 ERROR disk read failed",
    "2000-01-01 00:00:02 INFO disk mounted",
    "2000-01-01 00:00:01 INFO service started",
];

/// lines with multi-byte characters
pub const DATA_UTF8: &str = "\
première ligne été
second → línea ñandú
third 日本語のテキスト
fourth 🦀 crab 🦀
";

lazy_static! {
    pub static ref NTF_EMPTY: NamedTempFile = create_temp_file(DATA_EMPTY);
    pub static ref NTF_EMPTY_FPATH: FPath = ntf_fpath(&NTF_EMPTY);
    pub static ref NTF_ABCD: NamedTempFile = create_temp_file(DATA_ABCD);
    pub static ref NTF_ABCD_FPATH: FPath = ntf_fpath(&NTF_ABCD);
    pub static ref NTF_BASIC_10: NamedTempFile = create_temp_file(DATA_BASIC_10);
    pub static ref NTF_BASIC_10_FPATH: FPath = ntf_fpath(&NTF_BASIC_10);
    pub static ref NTF_UTF8: NamedTempFile = create_temp_file(DATA_UTF8);
    pub static ref NTF_UTF8_FPATH: FPath = ntf_fpath(&NTF_UTF8);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const WORDS: [&str; 12] = [
    "error", "warn", "info", "disk", "network", "Denmark", "two", "AND", "retry", "été", "ok", "",
];

/// Generate `lines` random log lines with a fixed `seed`.
/// Some lines are empty, some are long, some end with `'\r'`.
/// The text may or may not end with a line terminator.
pub fn random_log(
    seed: u64,
    lines: usize,
) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::new();
    for index in 0..lines {
        let words: usize = match rng.random_range(0..10) {
            0 => 0,
            1 => rng.random_range(40..120),
            _ => rng.random_range(1..8),
        };
        text.push_str(&format!("{:05}", index));
        for _ in 0..words {
            text.push(' ');
            text.push_str(WORDS[rng.random_range(0..WORDS.len())]);
        }
        if rng.random_range(0..20) == 0 {
            text.push('\r');
        }
        if index + 1 < lines || rng.random_bool(0.5) {
            text.push('\n');
        }
        if rng.random_range(0..15) == 0 {
            text.push('\n');
        }
    }

    text
}

/// Expected result of a search of `data`, computed the simplest way:
/// all non-empty lines (trailing `'\r'` removed) that contain every
/// lowercase term, most recent first, at most `count` (`0` is all).
pub fn expected_lines(
    data: &str,
    terms: &[&str],
    count: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = data
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let lower = line.to_lowercase();
            terms.iter().all(|term| lower.contains(term))
        })
        .map(String::from)
        .collect();
    lines.reverse();
    if count != 0 {
        lines.truncate(count);
    }

    lines
}

/// A `ByteSource` that fails after `reads_ok` successful reads.
#[derive(Debug)]
pub struct FailingSource {
    inner: BytesSource,
    reads_ok: usize,
}

impl FailingSource {
    pub fn new(
        path: &str,
        data: Vec<u8>,
        reads_ok: usize,
    ) -> FailingSource {
        FailingSource {
            inner: BytesSource::new(path, data),
            reads_ok,
        }
    }
}

impl ByteSource for FailingSource {
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
        if self.reads_ok == 0 {
            return Err(Error::new(ErrorKind::Other, "injected read failure"));
        }
        self.reads_ok -= 1;
        self.inner.read_exact_at(fileoffset, buffer)
    }
}
