//! Safe-response templates and the selection rule.

use serde::{Deserialize, Serialize};

use crate::classifier::{ContextFlags, Decision, RiskLevel};

/// Identifier of a safe-response template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// De-escalation: invite the user to pause and regulate before any
    /// confrontational or action-oriented content.
    PauseAndRegulate,
    /// Safe refusal with a referral to professional support; never a
    /// fabricated clinical diagnosis.
    ProfessionalReferral,
    /// Softened, neutralized rendition shown while human review is pending.
    BufferedNeutral,
    /// No intervention; content passes through unchanged.
    Passthrough,
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TemplateId::PauseAndRegulate => "pause_and_regulate",
            TemplateId::ProfessionalReferral => "professional_referral",
            TemplateId::BufferedNeutral => "buffered_neutral",
            TemplateId::Passthrough => "passthrough",
        };
        f.write_str(s)
    }
}

impl TemplateId {
    /// User-facing body for the template.
    pub fn body(&self) -> &'static str {
        match self {
            TemplateId::PauseAndRegulate => {
                "It sounds like things feel intense right now. Before going \
                 further, take a moment to pause and breathe. This report will \
                 wait for you; nothing here needs an immediate reaction."
            }
            TemplateId::ProfessionalReferral => {
                "This request touches on topics we can't assess from text \
                 alone. A licensed counselor or therapist is the right person \
                 to explore this with. We won't label anyone with a diagnosis."
            }
            TemplateId::BufferedNeutral => {
                "A softened summary is shown while this content is reviewed \
                 by our moderation team."
            }
            TemplateId::Passthrough => "",
        }
    }
}

/// Select the template for a classification outcome.
///
/// `stress_flag` wins over everything: a distressed user always gets the
/// de-escalation template, deferring any confrontational content.
pub fn select_template(risk: RiskLevel, decision: Decision, flags: &ContextFlags) -> TemplateId {
    if flags.stress_flag {
        return TemplateId::PauseAndRegulate;
    }
    if risk == RiskLevel::Level3 {
        return TemplateId::ProfessionalReferral;
    }
    if risk == RiskLevel::Level2 && decision == Decision::Flag {
        return TemplateId::BufferedNeutral;
    }
    TemplateId::Passthrough
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
