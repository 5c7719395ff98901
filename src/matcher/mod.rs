//! Pattern Matcher
//!
//! Stateless scan of a text span against a compiled [`SignatureSet`].
//! Pure over an immutable set, safe to call from any number of tasks.
//!
//! # Hardening
//! Input is NFKC-normalized and stripped of zero-width characters before
//! matching, so homograph and invisible-character evasion cannot slip a
//! signature past the scan.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::signatures::{SignalCategory, SignatureSet};

/// One signature hit in a scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalHit {
    pub category: SignalCategory,
    /// The signature text (literal keyword or regex source) that fired.
    pub signature: String,
    /// The span of normalized input that matched.
    pub matched: String,
    /// Byte offset of the match in the normalized input.
    pub offset: usize,
}

/// Matches text against a signature set.
#[derive(Clone)]
pub struct SignatureMatcher {
    set: Arc<SignatureSet>,
}

impl SignatureMatcher {
    pub fn new(set: Arc<SignatureSet>) -> Self {
        Self { set }
    }

    pub fn signature_version(&self) -> &str {
        self.set.version()
    }

    /// Scan `text` and return hits in detection order (by position in the
    /// input). Duplicate (category, signature) pairs are collapsed to their
    /// first occurrence. Empty input returns an empty list; nothing panics
    /// on arbitrary byte content.
    pub fn scan(&self, text: &str) -> Vec<SignalHit> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let normalized = canonicalize(text);

        let mut hits: Vec<SignalHit> = Vec::new();

        for m in self.set.automaton().find_iter(&normalized) {
            let (category, keyword) = &self.set.keywords()[m.pattern().as_usize()];
            hits.push(SignalHit {
                category: *category,
                signature: keyword.clone(),
                matched: normalized[m.start()..m.end()].to_string(),
                offset: m.start(),
            });
        }

        for (category, regex) in self.set.regexes() {
            for m in regex.find_iter(&normalized) {
                hits.push(SignalHit {
                    category: *category,
                    signature: regex.as_str().to_string(),
                    matched: m.as_str().to_string(),
                    offset: m.start(),
                });
            }
        }

        hits.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.category.cmp(&b.category)));
        dedupe_hits(hits)
    }

    /// Whether any signature fires, without materializing the hit list.
    pub fn matches(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let normalized = canonicalize(text);
        self.set.automaton().is_match(&normalized)
            || self.set.regexes().iter().any(|(_, r)| r.is_match(&normalized))
    }
}

/// NFKC-normalize, drop zero-width characters, and lowercase.
fn canonicalize(text: &str) -> String {
    text.nfkc()
        .filter(|c| !is_zero_width(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_zero_width(c: char) -> bool {
    matches!(
        c,
        '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{2060}' | '\u{feff}' | '\u{00ad}'
    )
}

/// Keep the first occurrence of each (category, signature) pair, preserving
/// detection order.
fn dedupe_hits(hits: Vec<SignalHit>) -> Vec<SignalHit> {
    let mut seen = std::collections::HashSet::new();
    hits.into_iter()
        .filter(|h| seen.insert((h.category, h.signature.clone())))
        .collect()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
