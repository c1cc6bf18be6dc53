//! Promo code CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::PromoCode;

/// Create a new promo code.
pub async fn create_promo_code(pool: &SqlitePool, promo: &PromoCode) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO promo_codes
            (code, discount_type, discount_value, usage_limit, used_count,
             expires_at, min_order_amount, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&promo.code)
    .bind(promo.discount_type)
    .bind(promo.discount_value)
    .bind(promo.usage_limit)
    .bind(promo.used_count)
    .bind(promo.expires_at)
    .bind(promo.min_order_amount)
    .bind(promo.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "PromoCode",
                    id: promo.code.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a promo code by its code string.
pub async fn get_promo_code(pool: &SqlitePool, code: &str) -> Result<PromoCode> {
    sqlx::query_as::<_, PromoCode>(
        r#"
        SELECT code, discount_type, discount_value, usage_limit, used_count,
               expires_at, min_order_amount, created_at
        FROM promo_codes
        WHERE code = ?
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "PromoCode",
        id: code.to_string(),
    })
}

/// List all promo codes in storage order.
pub async fn list_promo_codes(pool: &SqlitePool) -> Result<Vec<PromoCode>> {
    let codes = sqlx::query_as::<_, PromoCode>(
        r#"
        SELECT code, discount_type, discount_value, usage_limit, used_count,
               expires_at, min_order_amount, created_at
        FROM promo_codes
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(codes)
}

/// Record a redemption, guarding the usage cap.
///
/// Returns `true` when the count was incremented, `false` when the code
/// has a usage limit that is already reached.
pub async fn increment_used_count(pool: &SqlitePool, code: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE promo_codes
        SET used_count = used_count + 1
        WHERE code = ?
          AND (usage_limit IS NULL OR used_count < usage_limit)
        "#,
    )
    .bind(code)
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(true);
    }

    // Distinguish a capped code from a missing one.
    let exists = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM promo_codes
        WHERE code = ?
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    if exists.is_some() {
        Ok(false)
    } else {
        Err(DatabaseError::NotFound {
            entity: "PromoCode",
            id: code.to_string(),
        })
    }
}

/// Delete a promo code.
pub async fn delete_promo_code(pool: &SqlitePool, code: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM promo_codes
        WHERE code = ?
        "#,
    )
    .bind(code)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "PromoCode",
            id: code.to_string(),
        });
    }

    Ok(())
}
