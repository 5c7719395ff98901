//! The decision policy.
//!
//! Pure and total over (hits, flags): identical inputs always produce the
//! identical classification, which is what makes caller-side retries
//! idempotent and load-test assertions meaningful.

use crate::matcher::SignalHit;
use crate::signatures::SignalCategory;

use super::risk::{Classification, ContextFlags, Decision, RiskLevel};

/// Apply the severity policy to matcher output.
///
/// In descending severity:
/// 1. jailbreak or pii_extraction: LEVEL_3 / block, no override.
/// 2. injection or diagnostic_labeling: LEVEL_3 / block unless the
///    operator-only `allow_override` flag is set.
/// 3. manipulation: LEVEL_2 / flag (held for human review).
/// 4. `stress_flag` on an otherwise clean text: LEVEL_2 / flag.
/// 5. nothing: LEVEL_1 / allow.
pub fn classify(hits: &[SignalHit], flags: &ContextFlags) -> Classification {
    let has = |category: SignalCategory| hits.iter().any(|h| h.category == category);

    if has(SignalCategory::Jailbreak) || has(SignalCategory::PiiExtraction) {
        return Classification::new(RiskLevel::Level3, Decision::Block);
    }

    if (has(SignalCategory::Injection) || has(SignalCategory::DiagnosticLabeling))
        && !flags.allow_override
    {
        return Classification::new(RiskLevel::Level3, Decision::Block);
    }

    if has(SignalCategory::Manipulation) {
        return Classification::new(RiskLevel::Level2, Decision::Flag);
    }

    if flags.stress_flag {
        return Classification::new(RiskLevel::Level2, Decision::Flag);
    }

    Classification::new(RiskLevel::Level1, Decision::Allow)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
