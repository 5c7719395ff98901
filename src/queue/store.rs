//! The authoritative moderation item store.
//!
//! Claim and decide are compare-and-set transitions executed under the
//! item's shard entry lock, so exactly one of two racing claims wins and a
//! decided item can never be decided twice. Violations are rejected
//! fail-fast; the caller re-fetches state and retries explicitly.

use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use super::item::{ModerationAction, ModerationItem, QueueStatus};
use super::log::ActionLog;
use crate::classifier::RiskLevel;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("item {0} not found")]
    ItemNotFound(Uuid),

    #[error("item {item_id} already assigned to {held_by}")]
    AlreadyAssigned { item_id: Uuid, held_by: String },

    #[error("item {item_id} is not assigned to caller {caller}")]
    NotAssignedToCaller { item_id: Uuid, caller: String },

    #[error("item {item_id} already decided: {action}")]
    AlreadyDecided {
        item_id: Uuid,
        action: ModerationAction,
    },

    #[error("level_1 items never enter the review queue")]
    BelowQueueThreshold,
}

/// Durable store of flagged items. Items are retained forever for audit and
/// export; nothing here deletes.
pub struct ModerationQueue {
    items: DashMap<Uuid, ModerationItem>,
    log: ActionLog,
}

impl ModerationQueue {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            items: DashMap::new(),
            log: ActionLog::new(log_capacity),
        }
    }

    /// Admit a pending item. Only LEVEL_2/LEVEL_3 items may queue.
    pub fn insert(&self, item: ModerationItem) -> Result<Uuid, QueueError> {
        if item.risk_level < RiskLevel::Level2 {
            return Err(QueueError::BelowQueueThreshold);
        }
        let item_id = item.item_id;
        metrics::counter!("modguard_queue_inserted_total").increment(1);
        tracing::info!(
            item_id = %item_id,
            risk_level = %item.risk_level,
            "item queued for review"
        );
        self.items.insert(item_id, item);
        Ok(item_id)
    }

    pub fn get(&self, item_id: Uuid) -> Result<ModerationItem, QueueError> {
        self.items
            .get(&item_id)
            .map(|r| r.clone())
            .ok_or(QueueError::ItemNotFound(item_id))
    }

    /// Pending items, oldest first.
    pub fn pending(&self) -> Vec<ModerationItem> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|r| r.queue_status == QueueStatus::Pending)
            .map(|r| r.clone())
            .collect();
        items.sort_by_key(|i| i.created_at);
        items
    }

    /// Read-committed snapshot of every item, for analytics scans.
    pub fn scan(&self) -> Vec<ModerationItem> {
        self.items.iter().map(|r| r.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Claim an item for review.
    ///
    /// Fails `AlreadyAssigned` when another moderator holds the claim;
    /// re-claiming by the current holder is idempotent. The entry lock held
    /// by `get_mut` serializes racing claims on the same item.
    pub fn claim(&self, item_id: Uuid, moderator_id: &str) -> Result<ModerationItem, QueueError> {
        let mut entry = self
            .items
            .get_mut(&item_id)
            .ok_or(QueueError::ItemNotFound(item_id))?;

        if let Some(action) = entry.decision_action {
            return Err(QueueError::AlreadyDecided { item_id, action });
        }

        match &entry.assigned_moderator {
            Some(holder) if holder != moderator_id => Err(QueueError::AlreadyAssigned {
                item_id,
                held_by: holder.clone(),
            }),
            Some(_) => Ok(entry.clone()),
            None => {
                entry.assigned_moderator = Some(moderator_id.to_string());
                entry.version += 1;
                metrics::counter!("modguard_queue_claims_total").increment(1);
                tracing::info!(item_id = %item_id, moderator_id, "item claimed");
                Ok(entry.clone())
            }
        }
    }

    /// Record a terminal decision.
    ///
    /// Requires the caller to hold the claim and the item to still be
    /// pending. On success sets `decided_at` and `decision_action`, appends
    /// the action-log entry, and releases the claim.
    pub fn decide(
        &self,
        item_id: Uuid,
        moderator_id: &str,
        action: ModerationAction,
        notes: Option<String>,
    ) -> Result<ModerationItem, QueueError> {
        let mut entry = self
            .items
            .get_mut(&item_id)
            .ok_or(QueueError::ItemNotFound(item_id))?;

        if let Some(prior) = entry.decision_action {
            return Err(QueueError::AlreadyDecided {
                item_id,
                action: prior,
            });
        }

        match &entry.assigned_moderator {
            Some(holder) if holder == moderator_id => {}
            _ => {
                return Err(QueueError::NotAssignedToCaller {
                    item_id,
                    caller: moderator_id.to_string(),
                })
            }
        }

        entry.queue_status = action.as_status();
        entry.decision_action = Some(action);
        entry.decided_at = Some(Utc::now());
        entry.decision_notes = notes;
        entry.assigned_moderator = None;
        entry.version += 1;

        self.log.append(moderator_id, item_id, action);
        metrics::counter!("modguard_queue_decisions_total", "action" => action.to_string())
            .increment(1);
        tracing::info!(
            item_id = %item_id,
            moderator_id,
            action = %action,
            "moderation decision recorded"
        );
        Ok(entry.clone())
    }
}

impl Default for ModerationQueue {
    fn default() -> Self {
        Self::new(100_000)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
