//! Moderation data export.
//!
//! JSON and CSV exports carry the identical field set per record; only the
//! serialization syntax differs. Serialization failures surface as
//! `ExportFailure` rather than emitting a corrupt partial file.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::classifier::RiskLevel;
use crate::queue::{ModerationItem, ModerationQueue, QueueStatus};

use super::aggregate::{items_in_window, AnalyticsError};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Window(#[from] AnalyticsError),

    #[error("export serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown export format `{0}` (expected json or csv)")]
    UnknownFormat(String),
}

/// Export serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One exported item. The same fields appear in both formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub item_id: Uuid,
    pub risk_level: RiskLevel,
    pub queue_status: QueueStatus,
    pub created_at: String,
    pub decided_at: String,
    /// Matched categories in detection order, `|`-joined.
    pub matched_categories: String,
}

impl ExportRecord {
    fn from_item(item: &ModerationItem) -> Self {
        let mut categories: Vec<&str> = Vec::new();
        for (_, category) in &item.matched_keywords {
            let name = category.name();
            if !categories.contains(&name) {
                categories.push(name);
            }
        }
        Self {
            item_id: item.item_id,
            risk_level: item.risk_level,
            queue_status: item.queue_status,
            created_at: item.created_at.to_rfc3339(),
            decided_at: item
                .decided_at
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
            matched_categories: categories.join("|"),
        }
    }
}

/// Records for `[now - days, now]`, ordered by creation time.
pub fn export_records(
    queue: &ModerationQueue,
    days: u32,
) -> Result<Vec<ExportRecord>, ExportError> {
    let items = items_in_window(queue, days)?;
    Ok(items.iter().map(ExportRecord::from_item).collect())
}

/// Serialize the window's records in the requested format.
pub fn export(
    queue: &ModerationQueue,
    days: u32,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let records = export_records(queue, days)?;
    metrics::counter!("modguard_analytics_requests_total", "kind" => "export").increment(1);
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(&records)?),
        ExportFormat::Csv => Ok(to_csv(&records).into_bytes()),
    }
}

const CSV_HEADER: &str =
    "item_id,risk_level,queue_status,created_at,decided_at,matched_categories";

fn to_csv(records: &[ExportRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 96 + CSV_HEADER.len() + 1);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in records {
        let row = [
            r.item_id.to_string(),
            wire_name(&r.risk_level),
            wire_name(&r.queue_status),
            r.created_at.clone(),
            r.decided_at.clone(),
            r.matched_categories.clone(),
        ];
        let escaped: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    out
}

/// Snake-case wire name of a serde-tagged enum value.
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// RFC 4180 quoting for fields containing separators or quotes.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
