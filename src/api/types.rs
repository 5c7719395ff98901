//! Wire types for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{ContextFlags, RiskLevel};
use crate::policy::TemplateId;
use crate::queue::{HitlStatus, ModerationAction, ModerationItem, QueueStatus};
use crate::signatures::SignalCategory;

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
    #[serde(default)]
    pub context_flags: ContextFlags,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRequest {
    pub moderator_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecideRequest {
    pub moderator_id: String,
    pub action: ModerationAction,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
    pub days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    pub days: u32,
    pub format: String,
}

/// Moderator-facing view of a queue item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub item_id: Uuid,
    pub source_text: String,
    pub buffer_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub risk_level: RiskLevel,
    pub matched_keywords: Vec<(String, SignalCategory)>,
    pub queue_status: QueueStatus,
    pub hitl_status: Option<HitlStatus>,
    pub assigned_moderator: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_action: Option<ModerationAction>,
    pub decision_notes: Option<String>,
    pub template: TemplateId,
}

impl From<ModerationItem> for ItemView {
    fn from(item: ModerationItem) -> Self {
        let hitl_status = item.hitl_status();
        Self {
            item_id: item.item_id,
            source_text: item.source_text,
            buffer_text: item.buffer_text,
            created_at: item.created_at,
            risk_level: item.risk_level,
            matched_keywords: item.matched_keywords,
            queue_status: item.queue_status,
            hitl_status,
            assigned_moderator: item.assigned_moderator,
            decided_at: item.decided_at,
            decision_action: item.decision_action,
            decision_notes: item.decision_notes,
            template: item.template,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingListResponse {
    pub items: Vec<ItemView>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub signature_version: Option<String>,
    pub queue_depth: usize,
}
