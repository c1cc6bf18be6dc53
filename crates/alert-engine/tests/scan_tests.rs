//! Integration tests for the alert scan.
//!
//! Every test runs against an in-memory SQLite database and an
//! in-memory delivery sink; no external services are involved.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use alert_engine::{AlertScanner, EngineError, ScanOutcome, DEDUP_WINDOW};
use database::models::{AlertThresholds, AlertType, DiscountType, PromoCode};
use database::{alert_log, alert_thresholds, promo_code, Database};
use notifier::MemorySink;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}

async fn seed_thresholds(db: &Database, cap_pct: f64, days: i64, roi_pct: f64, emails: Vec<String>) {
    let thresholds = AlertThresholds::new(cap_pct, days, roi_pct, emails);
    alert_thresholds::upsert_thresholds(db.pool(), &thresholds)
        .await
        .unwrap();
}

async fn seed_code(db: &Database, promo: &PromoCode) {
    promo_code::create_promo_code(db.pool(), promo).await.unwrap();
}

fn ops() -> Vec<String> {
    vec!["ops@quickbite.dev".to_string()]
}

fn scanner(db: &Database, sink: &MemorySink) -> AlertScanner {
    AlertScanner::new(db.clone(), Arc::new(sink.clone()))
}

fn triggered(outcome: ScanOutcome) -> Vec<String> {
    match outcome {
        ScanOutcome::Completed { triggered } => triggered,
        other => panic!("expected Completed, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_thresholds_aborts_with_config_error() {
    let db = test_db().await;
    seed_code(
        &db,
        &PromoCode::new("A", DiscountType::Flat, 50.0).with_used_count(10),
    )
    .await;

    let sink = MemorySink::new();
    let result = scanner(&db, &sink).run().await;

    assert!(matches!(result, Err(EngineError::ThresholdsMissing)));
    assert_eq!(sink.delivery_count(), 0);
    assert!(alert_log::list_recent(db.pool(), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_recipients_short_circuits() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 200.0, vec![]).await;
    seed_code(
        &db,
        &PromoCode::new("A", DiscountType::Flat, 50.0)
            .with_usage_limit(10)
            .with_used_count(10),
    )
    .await;

    let sink = MemorySink::new();
    let outcome = scanner(&db, &sink).run().await.unwrap();

    assert_eq!(outcome, ScanOutcome::NoRecipients);
    assert_eq!(sink.delivery_count(), 0);
    assert!(alert_log::list_recent(db.pool(), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn redemption_cap_triggers_and_logs_snapshot() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 100_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("WELCOME20", DiscountType::Percentage, 20.0)
            .with_usage_limit(100)
            .with_used_count(81),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert_eq!(ids, ["WELCOME20:redemption_cap"]);
    assert_eq!(sink.delivery_count(), 1);

    let recorded = sink.deliveries();
    assert_eq!(recorded[0].notice.alert_type, "redemption_cap");
    assert_eq!(recorded[0].notice.promo_code, "WELCOME20");
    assert_eq!(recorded[0].recipients, ops());

    let log = alert_log::list_recent(db.pool(), 10).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].promo_code, "WELCOME20");
    assert_eq!(log[0].alert_type, "redemption_cap");
    assert_eq!(log[0].details.get("currentPct"), Some(&serde_json::json!(81)));
    assert_eq!(log[0].details.get("usageLimit"), Some(&serde_json::json!(100)));
}

#[tokio::test]
async fn redemption_needs_limit_and_usage() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("NOLIMIT", DiscountType::Flat, 60.0).with_used_count(1000),
    )
    .await;
    seed_code(
        &db,
        &PromoCode::new("UNUSED", DiscountType::Percentage, 10.0).with_usage_limit(100),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert!(ids.is_empty());
    assert_eq!(sink.delivery_count(), 0);
}

#[tokio::test]
async fn expired_code_triggers() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("OLD10", DiscountType::Flat, 5.0).with_expires_at(Utc::now() - DAY),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert_eq!(ids, ["OLD10:expired"]);

    let log = alert_log::list_recent(db.pool(), 10).await.unwrap();
    assert_eq!(log[0].alert_type, "expired");
    assert!(log[0].details.get("expiredAt").is_some());
}

#[tokio::test]
async fn expiring_soon_triggers_with_day_count() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("SPRING10", DiscountType::Percentage, 10.0)
            .with_expires_at(Utc::now() + Duration::from_secs(36 * 60 * 60)),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert_eq!(ids, ["SPRING10:expiring_soon"]);

    let log = alert_log::list_recent(db.pool(), 10).await.unwrap();
    assert_eq!(log[0].details.get("daysLeft"), Some(&serde_json::json!(2)));
    assert_eq!(log[0].details.get("thresholdDays"), Some(&serde_json::json!(3)));
}

#[tokio::test]
async fn roi_fires_at_exact_target() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 200.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("BIGSPEND", DiscountType::Flat, 50.0)
            .with_used_count(10)
            .with_min_order_amount(100.0),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert_eq!(ids, ["BIGSPEND:roi_target"]);

    let log = alert_log::list_recent(db.pool(), 10).await.unwrap();
    assert_eq!(log[0].details.get("roiPct"), Some(&serde_json::json!(200)));
    assert_eq!(log[0].details.get("discountGiven"), Some(&serde_json::json!(500.0)));
    assert_eq!(
        log[0].details.get("revenueInfluenced"),
        Some(&serde_json::json!(1500.0))
    );
}

#[tokio::test]
async fn second_run_inside_window_is_idempotent() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 200.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("X", DiscountType::Flat, 50.0)
            .with_usage_limit(100)
            .with_used_count(81)
            .with_min_order_amount(100.0),
    )
    .await;

    let sink = MemorySink::new();
    let scanner = scanner(&db, &sink);

    let first = triggered(scanner.run().await.unwrap());
    assert_eq!(first, ["X:redemption_cap", "X:roi_target"]);
    assert_eq!(sink.delivery_count(), 2);

    let second = triggered(scanner.run().await.unwrap());
    assert!(second.is_empty());
    // Suppressed before dispatch: no new delivery attempts.
    assert_eq!(sink.delivery_count(), 2);
    assert_eq!(alert_log::list_recent(db.pool(), 10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn alert_rearms_after_the_window_passes() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("A", DiscountType::Flat, 5.0)
            .with_usage_limit(10)
            .with_used_count(9),
    )
    .await;

    let sink = MemorySink::new();
    let scanner = scanner(&db, &sink).with_window(Duration::from_millis(200));

    let first = triggered(scanner.run().await.unwrap());
    assert_eq!(first, ["A:redemption_cap"]);

    // Still inside the shortened window.
    let second = triggered(scanner.run().await.unwrap());
    assert!(second.is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;

    let third = triggered(scanner.run().await.unwrap());
    assert_eq!(third, ["A:redemption_cap"]);
    assert_eq!(sink.delivery_count(), 2);
    assert_eq!(alert_log::list_recent(db.pool(), 10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn dedup_is_scoped_per_code_and_type() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("A", DiscountType::Flat, 5.0)
            .with_usage_limit(100)
            .with_used_count(90)
            .with_expires_at(Utc::now() - DAY),
    )
    .await;
    seed_code(
        &db,
        &PromoCode::new("B", DiscountType::Flat, 5.0)
            .with_usage_limit(100)
            .with_used_count(90),
    )
    .await;

    // A already got a redemption alert inside the window.
    alert_log::record_alert(
        db.pool(),
        "A",
        AlertType::RedemptionCap,
        &serde_json::Map::new(),
        DEDUP_WINDOW,
    )
    .await
    .unwrap();

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    // A's redemption is suppressed; A's expiry and B's redemption are not.
    assert_eq!(ids, ["A:expired", "B:redemption_cap"]);
}

#[tokio::test]
async fn failed_delivery_is_not_logged_and_retries_next_run() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 1_000_000.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("A", DiscountType::Percentage, 10.0)
            .with_usage_limit(10)
            .with_used_count(9),
    )
    .await;

    let sink = MemorySink::failing();
    let scanner = scanner(&db, &sink);

    let first = triggered(scanner.run().await.unwrap());
    assert!(first.is_empty());
    assert_eq!(sink.delivery_count(), 1);
    assert!(alert_log::list_recent(db.pool(), 10).await.unwrap().is_empty());

    // Transport recovers; the alert is still eligible.
    sink.set_failing(false);
    let second = triggered(scanner.run().await.unwrap());
    assert_eq!(second, ["A:redemption_cap"]);
    assert_eq!(sink.delivery_count(), 2);
    assert_eq!(alert_log::list_recent(db.pool(), 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn one_code_can_raise_all_three_alerts() {
    let db = test_db().await;
    seed_thresholds(&db, 80.0, 3, 200.0, ops()).await;
    seed_code(
        &db,
        &PromoCode::new("TRIPLE", DiscountType::Flat, 10.0)
            .with_usage_limit(10)
            .with_used_count(9)
            .with_expires_at(Utc::now() + DAY)
            .with_min_order_amount(100.0),
    )
    .await;

    let sink = MemorySink::new();
    let ids = triggered(scanner(&db, &sink).run().await.unwrap());

    assert_eq!(
        ids,
        [
            "TRIPLE:redemption_cap",
            "TRIPLE:expiring_soon",
            "TRIPLE:roi_target"
        ]
    );
    assert_eq!(sink.delivery_count(), 3);
    assert_eq!(alert_log::list_recent(db.pool(), 10).await.unwrap().len(), 3);
}
