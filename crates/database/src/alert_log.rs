//! Alert log persistence and window dedup.
//!
//! The alert log is an append-only audit trail. Whether an alert may
//! fire again is decided purely from timestamps: a `(promo_code,
//! alert_type)` pair is suppressed while a log row for it exists inside
//! the trailing dedup window. There is no status column.

use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{AlertLogEntry, AlertType};
use crate::Result;

/// Check whether an alert for `(code, alert_type)` was logged inside the
/// trailing `window` measured back from now.
pub async fn recent_alert_exists(
    pool: &SqlitePool,
    code: &str,
    alert_type: AlertType,
    window: Duration,
) -> Result<bool> {
    let cutoff = Utc::now() - window;

    let row = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM alert_log
        WHERE promo_code = ? AND alert_type = ? AND sent_at >= ?
        LIMIT 1
        "#,
    )
    .bind(code)
    .bind(alert_type.as_str())
    .bind(cutoff)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Append an alert log entry unless one already exists inside the
/// trailing `window`.
///
/// The insert and the window check run as one statement, so two
/// overlapping scans cannot both log the same `(code, alert_type)`
/// window. Returns `true` when a row was written.
pub async fn record_alert(
    pool: &SqlitePool,
    code: &str,
    alert_type: AlertType,
    details: &serde_json::Map<String, serde_json::Value>,
    window: Duration,
) -> Result<bool> {
    let now = Utc::now();
    let cutoff = now - window;

    let result = sqlx::query(
        r#"
        INSERT INTO alert_log (promo_code, alert_type, sent_at, details)
        SELECT ?, ?, ?, ?
        WHERE NOT EXISTS (
            SELECT 1
            FROM alert_log
            WHERE promo_code = ? AND alert_type = ? AND sent_at >= ?
        )
        "#,
    )
    .bind(code)
    .bind(alert_type.as_str())
    .bind(now)
    .bind(sqlx::types::Json(details))
    .bind(code)
    .bind(alert_type.as_str())
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Get the most recent alert log entries, newest first.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<AlertLogEntry>> {
    let rows = sqlx::query_as::<_, AlertLogEntry>(
        r#"
        SELECT id, promo_code, alert_type, sent_at, details
        FROM alert_log
        ORDER BY sent_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get the most recent alert log entries for one promo code, newest first.
pub async fn list_for_code(
    pool: &SqlitePool,
    code: &str,
    limit: i64,
) -> Result<Vec<AlertLogEntry>> {
    let rows = sqlx::query_as::<_, AlertLogEntry>(
        r#"
        SELECT id, promo_code, alert_type, sent_at, details
        FROM alert_log
        WHERE promo_code = ?
        ORDER BY sent_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(code)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
