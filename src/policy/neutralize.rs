//! Blacklist-driven neutralization of clinical labels and absolutes.
//!
//! Rewrites flagged content into probabilistic, non-diagnostic language.
//! The output is the "buffer" artifact stored alongside the original text;
//! the original is never mutated. Kept separate from classification so it
//! can be tested on its own.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Result of neutralizing a text span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralizedText {
    pub text: String,
    /// Number of blacklist replacements applied.
    pub replacements: usize,
}

/// (pattern, replacement) blacklist. Clinical labels become behavioral
/// observations; absolutes become probabilistic phrasing.
fn blacklist() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |pattern: &str, replacement: &'static str| {
            let compiled = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("invalid neutralization rule `{pattern}`: {e}"));
            (compiled, replacement)
        };
        vec![
            rule(
                r"\bis\s+a\s+narcissist\b",
                "may show some self-focused communication patterns",
            ),
            rule(r"\bnarcissist(ic)?\b", "self-focused"),
            rule(r"\bis\s+a\s+(sociopath|psychopath)\b", "shows patterns worth discussing with a professional"),
            rule(r"\b(sociopath|psychopath)\b", "person showing concerning patterns"),
            rule(r"\btoxic\b", "strained"),
            rule(r"\babuser\b", "person whose behavior raised concerns"),
            rule(r"\bgaslight(s|ing|er)?\b", "communication that may distort shared reality"),
            rule(r"\balways\b", "often"),
            rule(r"\bnever\b", "rarely"),
            rule(r"\bdefinitely\s+has\b", "may show signs associated with"),
            rule(r"\bcertainly\s+has\b", "may show signs associated with"),
            rule(r"\bhas\s+(bpd|npd|aspd)\b", "shows patterns that only a clinician could assess"),
        ]
    })
}

/// Rewrite `text` into its neutralized form.
///
/// Pure; identical input yields identical output. Text with no blacklisted
/// spans is returned unchanged with `replacements == 0`.
pub fn neutralize(text: &str) -> NeutralizedText {
    let mut result = text.to_string();
    let mut replacements = 0;

    for (pattern, replacement) in blacklist() {
        let count = pattern.find_iter(&result).count();
        if count > 0 {
            result = pattern.replace_all(&result, *replacement).into_owned();
            replacements += count;
        }
    }

    NeutralizedText {
        text: result,
        replacements,
    }
}

#[cfg(test)]
#[path = "neutralize_tests.rs"]
mod tests;
