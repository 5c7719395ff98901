//! Window scans over the queue and action log.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::classifier::RiskLevel;
use crate::queue::{ModerationItem, ModerationQueue, QueueStatus};

use super::snapshot::{
    AnalyticsSnapshot, KeywordTrend, ModeratorPerformance, QueueStats, ResponseTime,
    RiskDistribution, TimelinePoint,
};

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("window must cover at least one day (got {0})")]
    InvalidWindow(u32),
}

fn window_bounds(days: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), AnalyticsError> {
    if days == 0 {
        return Err(AnalyticsError::InvalidWindow(days));
    }
    let now = Utc::now();
    Ok((now - Duration::days(i64::from(days)), now))
}

pub(crate) fn items_in_window(
    queue: &ModerationQueue,
    days: u32,
) -> Result<Vec<ModerationItem>, AnalyticsError> {
    let (start, end) = window_bounds(days)?;
    let mut items: Vec<_> = queue
        .scan()
        .into_iter()
        .filter(|i| i.created_at >= start && i.created_at <= end)
        .collect();
    items.sort_by_key(|i| i.created_at);
    Ok(items)
}

/// Full rollup for `[now - days, now]`.
///
/// An empty window yields zeroed counts, a zero average response time, and
/// a zero approval rate rather than an error.
pub fn overview(
    queue: &ModerationQueue,
    days: u32,
    top_keywords: usize,
) -> Result<AnalyticsSnapshot, AnalyticsError> {
    let items = items_in_window(queue, days)?;

    let mut risk = RiskDistribution::default();
    let mut stats = QueueStats::default();
    let mut response_total = 0.0;
    let mut response_count = 0u64;

    for item in &items {
        match item.risk_level {
            RiskLevel::Level1 => risk.level_1 += 1,
            RiskLevel::Level2 => risk.level_2 += 1,
            RiskLevel::Level3 => risk.level_3 += 1,
        }
        match item.queue_status {
            QueueStatus::Pending => stats.pending += 1,
            QueueStatus::Approved => stats.approved += 1,
            QueueStatus::ApprovedWithBuffer => stats.approved_with_buffer += 1,
            QueueStatus::Rejected => stats.rejected += 1,
            QueueStatus::Modified => stats.modified += 1,
        }
        if let Some(secs) = item.response_seconds() {
            response_total += secs;
            response_count += 1;
        }
    }

    let avg_response_time = if response_count > 0 {
        response_total / response_count as f64
    } else {
        0.0
    };

    let terminal = stats.total_terminal();
    let approval_rate = if terminal > 0 {
        (stats.approved + stats.approved_with_buffer) as f64 / terminal as f64 * 100.0
    } else {
        0.0
    };

    metrics::counter!("modguard_analytics_requests_total", "kind" => "overview").increment(1);

    Ok(AnalyticsSnapshot {
        window_days: days,
        generated_at: Utc::now(),
        risk_distribution: risk,
        queue_stats: stats,
        response_time: ResponseTime { avg_response_time },
        approval_rate,
        keyword_trends: keyword_trends(&items, top_keywords),
    })
}

/// Top-N keyword counts over the window, count descending, ties broken by
/// the order in which a keyword was first seen. `items` must be sorted by
/// `created_at` ascending.
fn keyword_trends(items: &[ModerationItem], top_n: usize) -> Vec<KeywordTrend> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for item in items {
        for (keyword, _) in &item.matched_keywords {
            let entry = counts.entry(keyword.as_str()).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                (0, rank)
            });
            entry.0 += 1;
        }
    }

    let mut trends: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(k, (count, rank))| (k, count, rank))
        .collect();
    trends.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    trends
        .into_iter()
        .take(top_n)
        .map(|(keyword, count, _)| KeywordTrend {
            keyword: keyword.to_string(),
            count,
        })
        .collect()
}

/// Per-day item counts per risk level, oldest day first. Days with no
/// activity appear zero-filled so charts have a continuous axis.
///
/// The window `[now - days, now]` touches `days + 1` calendar dates (the
/// oldest one only partially), so the axis carries `days + 1` points and
/// every in-window item lands in a bucket.
pub fn timeline(queue: &ModerationQueue, days: u32) -> Result<Vec<TimelinePoint>, AnalyticsError> {
    let items = items_in_window(queue, days)?;
    let today = Utc::now().date_naive();

    let mut points: Vec<TimelinePoint> = (0..=days)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(u64::from(back))))
        .map(|date| TimelinePoint {
            date: date.format("%Y-%m-%d").to_string(),
            ..Default::default()
        })
        .collect();

    let mut by_date: HashMap<String, usize> = HashMap::new();
    for (idx, p) in points.iter().enumerate() {
        by_date.insert(p.date.clone(), idx);
    }

    for item in &items {
        let day = item.created_at.date_naive().format("%Y-%m-%d").to_string();
        if let Some(&idx) = by_date.get(&day) {
            match item.risk_level {
                RiskLevel::Level1 => points[idx].level_1 += 1,
                RiskLevel::Level2 => points[idx].level_2 += 1,
                RiskLevel::Level3 => points[idx].level_3 += 1,
            }
        }
    }

    metrics::counter!("modguard_analytics_requests_total", "kind" => "timeline").increment(1);
    Ok(points)
}

/// Per-moderator decision counts and average response latency over the
/// window. Built from the append-only action log joined with item state.
pub fn moderator_performance(
    queue: &ModerationQueue,
    days: u32,
) -> Result<Vec<ModeratorPerformance>, AnalyticsError> {
    let (start, end) = window_bounds(days)?;
    let entries = queue.action_log().entries_in_window(start, end);

    let mut by_moderator: HashMap<String, ModeratorPerformance> = HashMap::new();
    let mut latencies: HashMap<String, (f64, u64)> = HashMap::new();

    for entry in &entries {
        let perf = by_moderator
            .entry(entry.moderator_id.clone())
            .or_insert_with(|| ModeratorPerformance {
                moderator_id: entry.moderator_id.clone(),
                total_decisions: 0,
                approved: 0,
                approved_with_buffer: 0,
                rejected: 0,
                modified: 0,
                avg_response_time: 0.0,
            });
        perf.total_decisions += 1;
        match entry.action {
            crate::queue::ModerationAction::Approved => perf.approved += 1,
            crate::queue::ModerationAction::ApprovedWithBuffer => perf.approved_with_buffer += 1,
            crate::queue::ModerationAction::Rejected => perf.rejected += 1,
            crate::queue::ModerationAction::Modified => perf.modified += 1,
        }

        if let Ok(item) = queue.get(entry.item_id) {
            if let Some(secs) = item.response_seconds() {
                let slot = latencies.entry(entry.moderator_id.clone()).or_insert((0.0, 0));
                slot.0 += secs;
                slot.1 += 1;
            }
        }
    }

    for (moderator_id, (total, count)) in latencies {
        if let Some(perf) = by_moderator.get_mut(&moderator_id) {
            if count > 0 {
                perf.avg_response_time = total / count as f64;
            }
        }
    }

    let mut result: Vec<_> = by_moderator.into_values().collect();
    result.sort_by(|a, b| {
        b.total_decisions
            .cmp(&a.total_decisions)
            .then_with(|| a.moderator_id.cmp(&b.moderator_id))
    });

    metrics::counter!("modguard_analytics_requests_total", "kind" => "moderator_performance")
        .increment(1);
    Ok(result)
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
