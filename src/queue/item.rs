//! Moderation item: one inspected unit of text and its review state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::RiskLevel;
use crate::policy::TemplateId;
use crate::signatures::SignalCategory;

/// Review state of a queued item. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Pending,
    Approved,
    ApprovedWithBuffer,
    Rejected,
    Modified,
}

impl QueueStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, QueueStatus::Pending)
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Approved => "approved",
            QueueStatus::ApprovedWithBuffer => "approved_with_buffer",
            QueueStatus::Rejected => "rejected",
            QueueStatus::Modified => "modified",
        };
        f.write_str(s)
    }
}

/// A moderator's terminal decision on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approved,
    /// The moderator approved the softened buffer text, not the original.
    /// Recorded distinctly for analytics and audit.
    ApprovedWithBuffer,
    Rejected,
    Modified,
}

impl ModerationAction {
    pub fn as_status(&self) -> QueueStatus {
        match self {
            ModerationAction::Approved => QueueStatus::Approved,
            ModerationAction::ApprovedWithBuffer => QueueStatus::ApprovedWithBuffer,
            ModerationAction::Rejected => QueueStatus::Rejected,
            ModerationAction::Modified => QueueStatus::Modified,
        }
    }
}

impl std::fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_status().fmt(f)
    }
}

/// The review status handed to the downstream report generator. Rejected
/// content is withheld entirely and carries no HITL status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitlStatus {
    Approved,
    ApprovedWithBuffer,
    PendingReview,
}

/// One inspected unit of text.
///
/// `source_text` is immutable; `buffer_text` is a second immutable artifact
/// written once by the neutralization transform on the flag path. State
/// mutations go through [`crate::queue::ModerationQueue`] only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationItem {
    pub item_id: Uuid,
    pub source_text: String,
    pub created_at: DateTime<Utc>,
    pub risk_level: RiskLevel,
    /// (keyword, category) pairs in detection order.
    pub matched_keywords: Vec<(String, SignalCategory)>,
    pub queue_status: QueueStatus,
    pub assigned_moderator: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_action: Option<ModerationAction>,
    pub decision_notes: Option<String>,
    /// Softened rendition produced by the neutralization transform,
    /// present only on the flag (approved_with_buffer) path.
    pub buffer_text: Option<String>,
    /// Safe-response template selected at classification time.
    pub template: TemplateId,
    /// Optimistic-concurrency counter, bumped on every transition.
    pub version: u64,
}

impl ModerationItem {
    pub fn new(
        source_text: String,
        risk_level: RiskLevel,
        matched_keywords: Vec<(String, SignalCategory)>,
        template: TemplateId,
        buffer_text: Option<String>,
    ) -> Self {
        Self {
            item_id: Uuid::new_v4(),
            source_text,
            created_at: Utc::now(),
            risk_level,
            matched_keywords,
            queue_status: QueueStatus::Pending,
            assigned_moderator: None,
            decided_at: None,
            decision_action: None,
            decision_notes: None,
            buffer_text,
            template,
            version: 0,
        }
    }

    /// HITL status for the downstream report collaborator. `None` means the
    /// content is withheld (rejected) and nothing should surface.
    pub fn hitl_status(&self) -> Option<HitlStatus> {
        match self.queue_status {
            QueueStatus::Pending => Some(HitlStatus::PendingReview),
            QueueStatus::Approved | QueueStatus::Modified => Some(HitlStatus::Approved),
            QueueStatus::ApprovedWithBuffer => Some(HitlStatus::ApprovedWithBuffer),
            QueueStatus::Rejected => None,
        }
    }

    /// Seconds between creation and decision, if decided.
    pub fn response_seconds(&self) -> Option<f64> {
        self.decided_at
            .map(|d| (d - self.created_at).num_milliseconds() as f64 / 1000.0)
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
