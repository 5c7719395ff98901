//! Analytics Aggregator
//!
//! Read-only, time-windowed rollups over the moderation queue and the
//! action log. Scans are read-committed with respect to concurrent queue
//! writers; empty windows produce zeroed fields, never errors.

pub mod aggregate;
pub mod export;
pub mod snapshot;

pub use aggregate::{moderator_performance, overview, timeline, AnalyticsError};
pub use export::{export, export_records, ExportError, ExportFormat, ExportRecord};
pub use snapshot::{
    AnalyticsSnapshot, KeywordTrend, ModeratorPerformance, QueueStats, ResponseTime,
    RiskDistribution, TimelinePoint,
};
