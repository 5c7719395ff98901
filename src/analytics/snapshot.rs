//! Derived analytics types. Computed on request, never persisted as truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item counts per risk level within the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub level_1: u64,
    pub level_2: u64,
    pub level_3: u64,
}

/// Queue-state counts within the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: u64,
    pub approved: u64,
    pub approved_with_buffer: u64,
    pub rejected: u64,
    pub modified: u64,
}

impl QueueStats {
    pub fn total_terminal(&self) -> u64 {
        self.approved + self.approved_with_buffer + self.rejected + self.modified
    }
}

/// Mean pending-to-decided latency. Zero when the window holds no terminal
/// items, so downstream consumers never branch on null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseTime {
    pub avg_response_time: f64,
}

/// One keyword's occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTrend {
    pub keyword: String,
    pub count: u64,
}

/// Per-day item counts per risk level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Calendar day, `YYYY-MM-DD` (UTC).
    pub date: String,
    pub level_1: u64,
    pub level_2: u64,
    pub level_3: u64,
}

/// Per-moderator decision counts and latency over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratorPerformance {
    pub moderator_id: String,
    pub total_decisions: u64,
    pub approved: u64,
    pub approved_with_buffer: u64,
    pub rejected: u64,
    pub modified: u64,
    pub avg_response_time: f64,
}

/// The full on-request rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub window_days: u32,
    pub generated_at: DateTime<Utc>,
    pub risk_distribution: RiskDistribution,
    pub queue_stats: QueueStats,
    pub response_time: ResponseTime,
    /// Approval rate in percent over terminal items; 0 on an empty window.
    pub approval_rate: f64,
    /// Top-N keywords, count descending, ties broken by first-seen order.
    pub keyword_trends: Vec<KeywordTrend>,
}
