//! The inbound moderation pipeline.
//!
//! Wires the pattern matcher, risk classifier, moderation queue, and
//! escalation policy into the single classification operation the rest of
//! the service calls.
//!
//! # Fail-closed
//! If the signature store has no loaded set, classification does not
//! degrade to `allow`: the text is treated as LEVEL_3/block and queued for
//! human review, and the degradation is reported on the outcome. Safety
//! takes precedence over availability.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::classifier::{classify, Classification, ContextFlags, Decision, RiskLevel};
use crate::matcher::SignatureMatcher;
use crate::policy::{neutralize, select_template, TemplateId};
use crate::queue::{HitlStatus, ModerationItem, ModerationQueue, QueueError};
use crate::signatures::SignatureStore;

/// Hard cap on inbound text size; anything larger is rejected as malformed
/// before classification runs.
pub const MAX_TEXT_BYTES: usize = 65_536;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Result of submitting one text for moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub risk_level: RiskLevel,
    pub decision: Decision,
    /// Present only when the item was queued (LEVEL_2/LEVEL_3).
    pub item_id: Option<Uuid>,
    /// Review status for the downstream report generator.
    pub hitl_status: Option<HitlStatus>,
    pub template: TemplateId,
    /// Signature-set version that produced this classification, absent when
    /// the classifier ran degraded (fail-closed).
    pub signature_version: Option<String>,
    /// True when the signature store was unavailable and the block was
    /// applied fail-closed.
    pub degraded: bool,
}

/// Ties the stateless classification stages to the queue.
pub struct ModerationPipeline {
    signatures: Arc<SignatureStore>,
    queue: Arc<ModerationQueue>,
}

impl ModerationPipeline {
    pub fn new(signatures: Arc<SignatureStore>, queue: Arc<ModerationQueue>) -> Self {
        Self { signatures, queue }
    }

    pub fn queue(&self) -> &Arc<ModerationQueue> {
        &self.queue
    }

    pub fn signatures(&self) -> &Arc<SignatureStore> {
        &self.signatures
    }

    /// Classify `text` and, when flagged or blocked, create the pending
    /// review item and select the safe-response template.
    pub fn submit(&self, text: &str, flags: &ContextFlags) -> Result<SubmitOutcome, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::InvalidInput("text must not be empty".into()));
        }
        if text.len() > MAX_TEXT_BYTES {
            return Err(PipelineError::InvalidInput(format!(
                "text exceeds {} bytes",
                MAX_TEXT_BYTES
            )));
        }

        let (classification, matched_keywords, signature_version, degraded) =
            match self.signatures.current() {
                Ok(set) => {
                    let matcher = SignatureMatcher::new(set);
                    let hits = matcher.scan(text);
                    let keywords: Vec<_> = hits
                        .iter()
                        .map(|h| (h.signature.clone(), h.category))
                        .collect();
                    (
                        classify(&hits, flags),
                        keywords,
                        Some(matcher.signature_version().to_string()),
                        false,
                    )
                }
                Err(e) => {
                    // Signature store down: never allow, queue for review.
                    tracing::error!(error = %e, "signature store unavailable, failing closed");
                    metrics::counter!("modguard_classifier_degraded_total").increment(1);
                    (
                        Classification::new(RiskLevel::Level3, Decision::Block),
                        Vec::new(),
                        None,
                        true,
                    )
                }
            };

        let template = select_template(classification.risk_level, classification.decision, flags);
        metrics::counter!(
            "modguard_classifications_total",
            "decision" => classification.decision.to_string()
        )
        .increment(1);

        if !classification.risk_level.requires_review() {
            tracing::debug!(decision = %classification.decision, "text passed through");
            return Ok(SubmitOutcome {
                risk_level: classification.risk_level,
                decision: classification.decision,
                item_id: None,
                hitl_status: None,
                template,
                signature_version,
                degraded,
            });
        }

        // Flag path: produce the softened buffer artifact once, up front.
        let buffer_text = if template == TemplateId::BufferedNeutral {
            Some(neutralize(text).text)
        } else {
            None
        };

        let item = ModerationItem::new(
            text.to_string(),
            classification.risk_level,
            matched_keywords,
            template,
            buffer_text,
        );
        let item_id = self.queue.insert(item)?;

        Ok(SubmitOutcome {
            risk_level: classification.risk_level,
            decision: classification.decision,
            item_id: Some(item_id),
            hitl_status: Some(HitlStatus::PendingReview),
            template,
            signature_version,
            degraded,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
