//! modguard: the moderation core behind an AI-generated relationship
//! report service.
//!
//! Inspects user text and model outputs for abusive, manipulative,
//! diagnostic, or exploitative content; assigns a risk level; routes risky
//! items through a human review queue; enforces escalation and
//! safe-response policy; and aggregates moderation analytics.

pub mod analytics;
pub mod api;
pub mod classifier;
pub mod config;
pub mod matcher;
pub mod pipeline;
pub mod policy;
pub mod queue;
pub mod signatures;

pub use classifier::{Classification, ContextFlags, Decision, RiskLevel};
pub use config::Config;
pub use matcher::{SignatureMatcher, SignalHit};
pub use pipeline::{ModerationPipeline, SubmitOutcome};
pub use queue::{HitlStatus, ModerationAction, ModerationItem, ModerationQueue, QueueStatus};
pub use signatures::{SignalCategory, SignatureSet, SignatureStore};
