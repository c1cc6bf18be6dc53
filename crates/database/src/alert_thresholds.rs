//! Alert threshold configuration storage.
//!
//! A single global row (id = 1) holds the thresholds and the admin
//! recipient list. The alert scan loads it explicitly at the start of
//! every pass.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::AlertThresholds;
use crate::Result;

/// Get the global threshold configuration, if one has been saved.
pub async fn get_thresholds(pool: &SqlitePool) -> Result<Option<AlertThresholds>> {
    let row = sqlx::query_as::<_, AlertThresholds>(
        r#"
        SELECT redemption_cap_pct, expiry_days_before, roi_target_pct,
               alert_emails, updated_at
        FROM alert_thresholds
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Create or replace the global threshold configuration.
pub async fn upsert_thresholds(pool: &SqlitePool, thresholds: &AlertThresholds) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO alert_thresholds
            (id, redemption_cap_pct, expiry_days_before, roi_target_pct,
             alert_emails, updated_at)
        VALUES (1, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            redemption_cap_pct = excluded.redemption_cap_pct,
            expiry_days_before = excluded.expiry_days_before,
            roi_target_pct = excluded.roi_target_pct,
            alert_emails = excluded.alert_emails,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(thresholds.redemption_cap_pct)
    .bind(thresholds.expiry_days_before)
    .bind(thresholds.roi_target_pct)
    .bind(&thresholds.alert_emails)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
