//! Escalation Policy Engine
//!
//! Selects the safe-response template for a classification outcome and
//! produces the softened ("buffer") rendition of flagged content. Both are
//! pure functions; persisting the results on the moderation item is the
//! caller's job.

pub mod neutralize;
pub mod templates;

pub use neutralize::{neutralize, NeutralizedText};
pub use templates::{select_template, TemplateId};
