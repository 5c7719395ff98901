//! Tests for windowed aggregation.

use chrono::{Duration, Utc};

use super::*;
use crate::classifier::RiskLevel;
use crate::policy::TemplateId;
use crate::queue::{ModerationAction, ModerationItem, ModerationQueue};
use crate::signatures::SignalCategory;

fn item_with(
    risk: RiskLevel,
    keywords: &[&str],
    age: Duration,
) -> ModerationItem {
    let mut item = ModerationItem::new(
        "flagged text".into(),
        risk,
        keywords
            .iter()
            .map(|k| (k.to_string(), SignalCategory::Manipulation))
            .collect(),
        TemplateId::BufferedNeutral,
        None,
    );
    item.created_at = Utc::now() - age;
    item
}

fn seeded_queue() -> ModerationQueue {
    let q = ModerationQueue::new(1000);
    q.insert(item_with(RiskLevel::Level2, &["how to gaslight"], Duration::hours(1)))
        .unwrap();
    q.insert(item_with(RiskLevel::Level3, &["bypass your filters"], Duration::hours(2)))
        .unwrap();
    q.insert(item_with(
        RiskLevel::Level2,
        &["how to gaslight", "make my partner obey"],
        Duration::hours(3),
    ))
    .unwrap();
    q
}

#[test]
fn test_zero_window_rejected() {
    let q = ModerationQueue::default();
    assert!(matches!(
        overview(&q, 0, 10),
        Err(AnalyticsError::InvalidWindow(0))
    ));
}

#[test]
fn test_empty_window_zero_safety() {
    let q = ModerationQueue::default();
    let snap = overview(&q, 7, 10).unwrap();
    assert_eq!(snap.risk_distribution, RiskDistribution::default());
    assert_eq!(snap.queue_stats, QueueStats::default());
    assert_eq!(snap.response_time.avg_response_time, 0.0);
    assert_eq!(snap.approval_rate, 0.0);
    assert!(snap.keyword_trends.is_empty());
}

#[test]
fn test_risk_distribution() {
    let snap = overview(&seeded_queue(), 7, 10).unwrap();
    assert_eq!(snap.risk_distribution.level_1, 0);
    assert_eq!(snap.risk_distribution.level_2, 2);
    assert_eq!(snap.risk_distribution.level_3, 1);
}

#[test]
fn test_window_excludes_old_items() {
    let q = seeded_queue();
    q.insert(item_with(RiskLevel::Level3, &[], Duration::days(40)))
        .unwrap();

    let wide = overview(&q, 90, 10).unwrap();
    let narrow = overview(&q, 7, 10).unwrap();
    assert_eq!(wide.risk_distribution.level_3, 2);
    assert_eq!(narrow.risk_distribution.level_3, 1);
}

#[test]
fn test_keyword_trends_count_and_tiebreak() {
    let snap = overview(&seeded_queue(), 7, 10).unwrap();
    assert_eq!(snap.keyword_trends[0].keyword, "how to gaslight");
    assert_eq!(snap.keyword_trends[0].count, 2);

    // At equal counts, first-seen order wins: the oldest item carries
    // "make my partner obey", so it precedes "bypass your filters".
    let ties: Vec<&str> = snap.keyword_trends[1..]
        .iter()
        .map(|t| t.keyword.as_str())
        .collect();
    assert_eq!(ties, vec!["make my partner obey", "bypass your filters"]);
}

#[test]
fn test_keyword_trends_top_n_cap() {
    let snap = overview(&seeded_queue(), 7, 1).unwrap();
    assert_eq!(snap.keyword_trends.len(), 1);
}

#[test]
fn test_approval_rate_over_terminal_items() {
    let q = seeded_queue();
    let pending = q.pending();
    let (a, b) = (pending[0].item_id, pending[1].item_id);

    q.claim(a, "mod-a").unwrap();
    q.decide(a, "mod-a", ModerationAction::Approved, None).unwrap();
    q.claim(b, "mod-a").unwrap();
    q.decide(b, "mod-a", ModerationAction::Rejected, None).unwrap();

    let snap = overview(&q, 7, 10).unwrap();
    assert_eq!(snap.queue_stats.total_terminal(), 2);
    assert!((snap.approval_rate - 50.0).abs() < 0.001);
}

#[test]
fn test_avg_response_time_over_decided_items() {
    let q = ModerationQueue::new(100);
    let id = q
        .insert(item_with(RiskLevel::Level2, &[], Duration::seconds(120)))
        .unwrap();
    q.claim(id, "mod-a").unwrap();
    q.decide(id, "mod-a", ModerationAction::Approved, None).unwrap();

    let snap = overview(&q, 7, 10).unwrap();
    // Item was created ~120s before the decision.
    assert!(snap.response_time.avg_response_time > 100.0);
    assert!(snap.response_time.avg_response_time < 180.0);
}

#[test]
fn test_timeline_has_continuous_axis() {
    // A 7-day window touches 8 calendar dates.
    let points = timeline(&seeded_queue(), 7).unwrap();
    assert_eq!(points.len(), 8);
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(points.last().unwrap().date, today);
    let level_2_total: u64 = points.iter().map(|p| p.level_2).sum();
    assert_eq!(level_2_total, 2);
}

#[test]
fn test_timeline_keeps_items_on_oldest_window_day() {
    // An item created just inside the window falls on the partially
    // covered oldest calendar day; it must still get a bucket.
    let q = ModerationQueue::new(100);
    q.insert(item_with(
        RiskLevel::Level3,
        &[],
        Duration::days(7) - Duration::minutes(5),
    ))
    .unwrap();

    let snap = overview(&q, 7, 10).unwrap();
    assert_eq!(snap.risk_distribution.level_3, 1);

    let points = timeline(&q, 7).unwrap();
    let total: u64 = points.iter().map(|p| p.level_1 + p.level_2 + p.level_3).sum();
    assert_eq!(total, 1, "timeline and overview must agree on the window");
}

#[test]
fn test_timeline_totals_match_window_scan() {
    let q = seeded_queue();
    let in_window = items_in_window(&q, 7).unwrap().len() as u64;
    let points = timeline(&q, 7).unwrap();
    let total: u64 = points.iter().map(|p| p.level_1 + p.level_2 + p.level_3).sum();
    assert_eq!(total, in_window);
}

#[test]
fn test_moderator_performance_counts() {
    let q = seeded_queue();
    let pending = q.pending();
    let (a, b, c) = (pending[0].item_id, pending[1].item_id, pending[2].item_id);

    q.claim(a, "mod-a").unwrap();
    q.decide(a, "mod-a", ModerationAction::Approved, None).unwrap();
    q.claim(b, "mod-a").unwrap();
    q.decide(b, "mod-a", ModerationAction::ApprovedWithBuffer, None)
        .unwrap();
    q.claim(c, "mod-b").unwrap();
    q.decide(c, "mod-b", ModerationAction::Rejected, None).unwrap();

    let perf = moderator_performance(&q, 7).unwrap();
    assert_eq!(perf.len(), 2);
    assert_eq!(perf[0].moderator_id, "mod-a");
    assert_eq!(perf[0].total_decisions, 2);
    assert_eq!(perf[0].approved, 1);
    assert_eq!(perf[0].approved_with_buffer, 1);
    assert_eq!(perf[1].moderator_id, "mod-b");
    assert_eq!(perf[1].rejected, 1);
    assert!(perf[0].avg_response_time > 0.0);
}

#[test]
fn test_moderator_performance_empty_window() {
    let q = ModerationQueue::default();
    assert!(moderator_performance(&q, 30).unwrap().is_empty());
}
