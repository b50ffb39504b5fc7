// src/data/predicate.rs

//! Implements [`MatchPredicate`], the keyword test applied to each line.
//!
//! [`MatchPredicate`]: crate::data::predicate::MatchPredicate

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Standalone words in a keyword that separate terms.
pub const KEYWORD_AND_TOKENS: [&str; 2] = ["AND", "and"];

/// A keyword test for lines.
///
/// Matching is case-insensitive substring containment. There is no `OR`,
/// no negation, no regular expressions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchPredicate {
    /// No keyword; every line matches.
    Always,
    /// Every term (stored lowercase) must be present in a line.
    AllOf(Vec<String>),
}

impl MatchPredicate {
    /// Build a `MatchPredicate` from a raw keyword string.
    ///
    /// The keyword is split on the standalone words `AND` or `and` (delimited
    /// by whitespace or the ends of the keyword). Each term is trimmed.
    /// Empty terms are dropped. A keyword without any non-empty term is
    /// [`MatchPredicate::Always`].
    pub fn new(keyword: Option<&str>) -> MatchPredicate {
        defn!("({:?})", keyword);
        let keyword: &str = match keyword {
            Some(val) => val,
            None => {
                defx!("return Always");
                return MatchPredicate::Always;
            }
        };
        let mut terms: Vec<String> = Vec::new();
        let mut term: String = String::new();
        // each piece is one whitespace-delimited word with its trailing
        // whitespace character, or an empty word for runs of whitespace
        for piece in keyword.split_inclusive(char::is_whitespace) {
            let word: &str = piece.trim_end_matches(char::is_whitespace);
            if KEYWORD_AND_TOKENS.contains(&word) {
                terms.push(term.trim().to_lowercase());
                term.clear();
            } else {
                term.push_str(piece);
            }
        }
        terms.push(term.trim().to_lowercase());
        terms.retain(|t| !t.is_empty());
        if terms.is_empty() {
            defx!("return Always; no terms in {:?}", keyword);
            return MatchPredicate::Always;
        }
        defx!("return AllOf({:?})", terms);

        MatchPredicate::AllOf(terms)
    }

    /// Does `line` satisfy this predicate?
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            MatchPredicate::Always => true,
            MatchPredicate::AllOf(terms) => {
                let line_lower: String = line.to_lowercase();
                terms
                    .iter()
                    .all(|term| line_lower.contains(term.as_str()))
            }
        }
    }

    /// The lowercase terms; empty for [`MatchPredicate::Always`].
    pub fn terms(&self) -> &[String] {
        match self {
            MatchPredicate::Always => &[],
            MatchPredicate::AllOf(terms) => terms.as_slice(),
        }
    }
}
