//! Moderation Queue
//!
//! Durable store of flagged items with a one-shot state machine
//! (pending → approved | approved_with_buffer | rejected | modified),
//! single-claimant moderator assignment, and an append-only action log.

pub mod item;
pub mod log;
pub mod store;

pub use item::{HitlStatus, ModerationAction, ModerationItem, QueueStatus};
pub use log::{ActionLog, ActionLogEntry};
pub use store::{ModerationQueue, QueueError};
