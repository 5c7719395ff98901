//! Risk levels, decisions, and contextual flags.

use serde::{Deserialize, Serialize};

/// Discrete risk levels: normal / sensitive / critical.
///
/// Assigned once at classification time and never silently changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "level_1")]
    Level1 = 1,
    #[serde(rename = "level_2")]
    Level2 = 2,
    #[serde(rename = "level_3")]
    Level3 = 3,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Level1 => write!(f, "LEVEL_1"),
            RiskLevel::Level2 => write!(f, "LEVEL_2"),
            RiskLevel::Level3 => write!(f, "LEVEL_3"),
        }
    }
}

impl RiskLevel {
    /// Level 2 and above require human review.
    pub fn requires_review(&self) -> bool {
        *self >= RiskLevel::Level2
    }
}

/// Classification outcome for a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Flag,
    Block,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Flag => write!(f, "flag"),
            Decision::Block => write!(f, "block"),
        }
    }
}

/// Caller-supplied context accompanying a classification request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFlags {
    /// The user self-reported (or upstream detected) acute distress. A
    /// distressed user's request is never silently auto-approved, even when
    /// the text itself looks benign.
    #[serde(default)]
    pub stress_flag: bool,

    /// Operator-only override used in manual testing; downgrades injection
    /// and diagnostic-labeling blocks. Never exposed to end users.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_override: bool,
}

/// The (risk level, decision) pair produced by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub decision: Decision,
}

impl Classification {
    pub const fn new(risk_level: RiskLevel, decision: Decision) -> Self {
        Self {
            risk_level,
            decision,
        }
    }
}
