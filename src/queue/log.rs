//! Append-only moderator action log.
//!
//! Source of truth for moderator-performance analytics. Entries are never
//! mutated or deleted; the log only grows (bounded by a configured capacity
//! that drops the oldest entries, matching audit-log retention practice).

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::ModerationAction;

/// One recorded moderator decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub entry_id: String,
    pub moderator_id: String,
    pub item_id: Uuid,
    pub action: ModerationAction,
    pub timestamp: DateTime<Utc>,
}

/// Generate a unique log entry id.
fn generate_entry_id() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes[..]);
    hex::encode(bytes)
}

/// Append-only action log.
pub struct ActionLog {
    entries: RwLock<Vec<ActionLogEntry>>,
    max_entries: usize,
}

impl ActionLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            max_entries,
        }
    }

    /// Record a decision. Returns the entry id.
    pub fn append(
        &self,
        moderator_id: &str,
        item_id: Uuid,
        action: ModerationAction,
    ) -> String {
        let entry = ActionLogEntry {
            entry_id: generate_entry_id(),
            moderator_id: moderator_id.to_string(),
            item_id,
            action,
            timestamp: Utc::now(),
        };
        let entry_id = entry.entry_id.clone();
        let mut entries = self.entries.write();
        entries.push(entry);
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(0..excess);
        }
        entry_id
    }

    /// Entries within `[start, end]`, in append order.
    pub fn entries_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<ActionLogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .cloned()
            .collect()
    }

    pub fn entries_for_moderator(&self, moderator_id: &str) -> Vec<ActionLogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.moderator_id == moderator_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(100_000)
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
