//! Text matching primitives
//!
//! Predicates never compute string distance themselves. They go through the
//! [`TextMatcher`] trait so an alternate similarity measure can be swapped in
//! without touching predicate logic. [`FuzzyMatcher`] is the default:
//! normalized Levenshtein similarity via `strsim`, and multi-needle substring
//! search via `aho-corasick`.

use aho_corasick::{AhoCorasick, MatchKind};
use tracing::debug;

/// Pure text matching functions used by the predicates
pub trait TextMatcher {
    /// Similarity of two strings as a percentage in `[0, 100]`
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Byte offset of the first occurrence of any needle in the haystack
    fn find_any(&self, haystack: &str, needles: &[String]) -> Option<usize>;

    /// Whether any needle occurs in the haystack
    fn contains_any(&self, haystack: &str, needles: &[String]) -> bool {
        self.find_any(haystack, needles).is_some()
    }

    /// Whether any needle occurs in any of the haystacks
    fn contains_any_within(&self, haystacks: &[String], needles: &[String]) -> bool {
        haystacks
            .iter()
            .any(|haystack| self.contains_any(haystack, needles))
    }
}

/// Default matcher: edit-distance similarity and Aho-Corasick substring search
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl TextMatcher for FuzzyMatcher {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b) * 100.0
    }

    fn find_any(&self, haystack: &str, needles: &[String]) -> Option<usize> {
        if needles.is_empty() {
            return None;
        }

        match build_automaton(needles) {
            Some(automaton) => automaton.find(haystack).map(|m| m.start()),
            None => needles
                .iter()
                .filter_map(|needle| haystack.find(needle.as_str()))
                .min(),
        }
    }

    fn contains_any_within(&self, haystacks: &[String], needles: &[String]) -> bool {
        if needles.is_empty() {
            return false;
        }

        match build_automaton(needles) {
            Some(automaton) => haystacks
                .iter()
                .any(|haystack| automaton.is_match(haystack.as_str())),
            None => haystacks.iter().any(|haystack| {
                needles
                    .iter()
                    .any(|needle| haystack.contains(needle.as_str()))
            }),
        }
    }
}

/// Leftmost-first automaton over the needles; `None` falls back to a plain scan
fn build_automaton(needles: &[String]) -> Option<AhoCorasick> {
    match AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .build(needles)
    {
        Ok(automaton) => Some(automaton),
        Err(e) => {
            debug!("Substring automaton build failed: {}", e);
            None
        }
    }
}
