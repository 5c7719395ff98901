//! Risk Classifier
//!
//! Turns matcher output plus contextual flags into a discrete risk level
//! and a deterministic allow/flag/block decision.

pub mod classify;
pub mod risk;

pub use classify::classify;
pub use risk::{Classification, ContextFlags, Decision, RiskLevel};
