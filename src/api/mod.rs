//! HTTP surface.
//!
//! Three endpoint families: inbound classification, moderator queue
//! operations, and admin-authenticated analytics (including CSV/JSON
//! export). The handlers hold no moderation logic; they translate between
//! wire types and the pipeline/queue/analytics modules.

pub mod error;
pub mod handlers;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use server::{build_router, start_server, AppState};
