//! Compiled signature sets and the hot-reloadable store.
//!
//! A [`SignatureSet`] is immutable once compiled and carries a content
//! fingerprint so classifications can be traced to the exact signature
//! version that produced them. The [`SignatureStore`] holds the active set
//! behind a `parking_lot::RwLock`; readers clone the `Arc` and never block
//! a reload.

use std::path::Path;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::catalog::{builtin_signature_file, SignalCategory, SignatureFile};

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("signature file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("signature file parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {category} pattern `{pattern}`: {source}")]
    InvalidPattern {
        category: SignalCategory,
        pattern: String,
        source: regex::Error,
    },

    #[error("signature file contains no signatures")]
    EmptyCatalog,

    #[error("keyword automaton build failed: {0}")]
    AutomatonBuild(#[from] aho_corasick::BuildError),

    #[error("signature store has no loaded set")]
    Unavailable,
}

/// Immutable, compiled signature set.
#[derive(Debug)]
pub struct SignatureSet {
    /// Content fingerprint (truncated sha256 over the sorted signature text).
    version: String,
    /// Literal keywords, index-aligned with the automaton's pattern ids.
    keywords: Vec<(SignalCategory, String)>,
    automaton: AhoCorasick,
    regexes: Vec<(SignalCategory, Regex)>,
}

impl SignatureSet {
    /// Compile a signature file into a matchable set.
    pub fn compile(file: &SignatureFile) -> Result<Self, SignatureError> {
        if file.is_empty() {
            return Err(SignatureError::EmptyCatalog);
        }

        let mut keywords = Vec::new();
        let mut regexes = Vec::new();
        for category in SignalCategory::ALL {
            let sigs = file.category(category);
            for keyword in &sigs.keywords {
                keywords.push((category, keyword.to_lowercase()));
            }
            for pattern in &sigs.patterns {
                let compiled = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SignatureError::InvalidPattern {
                        category,
                        pattern: pattern.clone(),
                        source,
                    })?;
                regexes.push((category, compiled));
            }
        }

        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(keywords.iter().map(|(_, k)| k.as_str()))?;

        Ok(Self {
            version: fingerprint(file),
            keywords,
            automaton,
            regexes,
        })
    }

    /// Compile the built-in catalog. The catalog is static and known-valid.
    pub fn builtin() -> Self {
        Self::compile(&builtin_signature_file())
            .expect("built-in signature catalog must compile")
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.regexes.len()
    }

    pub(crate) fn keywords(&self) -> &[(SignalCategory, String)] {
        &self.keywords
    }

    pub(crate) fn automaton(&self) -> &AhoCorasick {
        &self.automaton
    }

    pub(crate) fn regexes(&self) -> &[(SignalCategory, Regex)] {
        &self.regexes
    }
}

/// Truncated sha256 over the sorted signature text, stable across
/// serialization order.
fn fingerprint(file: &SignatureFile) -> String {
    let mut lines = Vec::new();
    for category in SignalCategory::ALL {
        let sigs = file.category(category);
        for keyword in &sigs.keywords {
            lines.push(format!("{}:kw:{}", category, keyword.to_lowercase()));
        }
        for pattern in &sigs.patterns {
            lines.push(format!("{}:re:{}", category, pattern));
        }
    }
    lines.sort();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(&hasher.finalize()[..8])
}

/// Holds the active signature set; reload swaps it atomically.
pub struct SignatureStore {
    active: RwLock<Option<Arc<SignatureSet>>>,
}

impl SignatureStore {
    /// Store seeded with the built-in catalog.
    pub fn with_builtin() -> Self {
        Self {
            active: RwLock::new(Some(Arc::new(SignatureSet::builtin()))),
        }
    }

    /// Store with no loaded set. `current()` fails until a reload succeeds;
    /// callers are expected to fail closed.
    pub fn unavailable() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    /// Store seeded from a signature file on disk.
    pub fn from_file(path: &Path) -> Result<Self, SignatureError> {
        let store = Self::unavailable();
        store.reload_from_file(path)?;
        Ok(store)
    }

    /// The active set, or `Unavailable` when no set has loaded.
    pub fn current(&self) -> Result<Arc<SignatureSet>, SignatureError> {
        self.active
            .read()
            .clone()
            .ok_or(SignatureError::Unavailable)
    }

    /// Parse and compile `path`, then swap it in. The previous set stays
    /// active if anything fails.
    pub fn reload_from_file(&self, path: &Path) -> Result<String, SignatureError> {
        let raw = std::fs::read_to_string(path)?;
        let file: SignatureFile = toml::from_str(&raw)?;
        let set = Arc::new(SignatureSet::compile(&file)?);
        let version = set.version().to_string();
        *self.active.write() = Some(set);
        tracing::info!(version = %version, path = %path.display(), "signature set reloaded");
        Ok(version)
    }

    /// Swap in an already-compiled set (tests, embedded callers).
    pub fn replace(&self, set: SignatureSet) {
        *self.active.write() = Some(Arc::new(set));
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
