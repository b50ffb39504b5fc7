// src/data/collector.rs

//! Collectors of matching lines: [`BoundedCollector`] for backward
//! searches and [`SlidingWindow`] for forward searches.
//!
//! [`BoundedCollector`]: crate::data::collector::BoundedCollector
//! [`SlidingWindow`]: crate::data::collector::SlidingWindow

use crate::common::Count;

use std::collections::VecDeque;

use ::more_asserts::debug_assert_le;

/// Upper limit of up-front allocation for collected lines.
const COLLECT_PREALLOC_MAX: Count = 1024;

/// Accumulates matching lines up to a limit of `count` lines. A `count` of
/// `0` means no limit.
///
/// Lines are kept in insertion order. Since a backward search inserts the
/// most recent line first, the collected lines are most-recent-first.
#[derive(Debug)]
pub struct BoundedCollector {
    count: Count,
    lines: Vec<String>,
}

impl BoundedCollector {
    pub fn new(count: Count) -> BoundedCollector {
        let prealloc: Count = match count {
            0 => 0,
            _ => std::cmp::min(count, COLLECT_PREALLOC_MAX),
        };

        BoundedCollector {
            count,
            lines: Vec::with_capacity(prealloc as usize),
        }
    }

    /// Keep `line` unless the collector is full. Returns `true` if `line`
    /// was kept.
    pub fn accept(&mut self, line: String) -> bool {
        if self.is_full() {
            return false;
        }
        self.lines.push(line);
        debug_assert_le!(self.count_lines(), if self.count == 0 { Count::MAX } else { self.count });

        true
    }

    /// The limit was reached. Never `true` for a `count` of `0`.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count != 0 && self.count_lines() >= self.count
    }

    #[inline(always)]
    pub fn count_lines(&self) -> Count {
        self.lines.len() as Count
    }

    /// The collected lines in insertion order.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// A fixed-capacity ring buffer of the most recently pushed `count` lines,
/// evicting the oldest line on overflow. A `count` of `0` means no limit
/// (nothing is ever evicted).
///
/// Used by a forward search, which pushes lines oldest-first.
#[derive(Debug)]
pub struct SlidingWindow {
    count: Count,
    window: VecDeque<String>,
    evicted: Count,
}

impl SlidingWindow {
    pub fn new(count: Count) -> SlidingWindow {
        let prealloc: Count = match count {
            0 => 0,
            _ => std::cmp::min(count, COLLECT_PREALLOC_MAX),
        };

        SlidingWindow {
            count,
            window: VecDeque::with_capacity(prealloc as usize),
            evicted: 0,
        }
    }

    /// Push `line` as the newest line, evicting the oldest line if the
    /// window is at capacity.
    pub fn push(&mut self, line: String) {
        if self.count != 0 && self.window.len() as Count >= self.count {
            self.window.pop_front();
            self.evicted += 1;
        }
        self.window.push_back(line);
    }

    #[inline(always)]
    pub fn count_lines(&self) -> Count {
        self.window.len() as Count
    }

    /// Count of lines evicted so far.
    #[inline(always)]
    pub const fn count_evicted(&self) -> Count {
        self.evicted
    }

    /// The lines, newest first.
    pub fn into_lines_newest_first(self) -> Vec<String> {
        self.window.into_iter().rev().collect()
    }
}
