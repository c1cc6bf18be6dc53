//! Database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Order amount assumed for a promo code that does not set one.
pub const DEFAULT_MIN_ORDER_AMOUNT: f64 = 100.0;

/// How a promo code's discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount off the order total.
    Flat,
    /// Percentage off the order total.
    Percentage,
}

impl DiscountType {
    /// Get the storage/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Percentage => "percentage",
        }
    }
}

/// A promotional discount code.
///
/// `used_count` is incremented by the order flow and only ever grows;
/// the alert scan treats promo codes as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PromoCode {
    /// Unique code string (e.g. "BITE10").
    pub code: String,
    /// Discount kind.
    pub discount_type: DiscountType,
    /// Flat amount or percentage, per `discount_type`.
    pub discount_value: f64,
    /// Optional redemption cap.
    pub usage_limit: Option<i64>,
    /// Redemptions so far.
    pub used_count: i64,
    /// Optional expiry instant.
    pub expires_at: Option<DateTime<Utc>>,
    /// Minimum order amount for the code to apply.
    pub min_order_amount: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    /// Create a new promo code with no usage cap, no expiry, and zero uses.
    pub fn new(
        code: impl Into<String>,
        discount_type: DiscountType,
        discount_value: f64,
    ) -> Self {
        Self {
            code: code.into(),
            discount_type,
            discount_value,
            usage_limit: None,
            used_count: 0,
            expires_at: None,
            min_order_amount: None,
            created_at: Utc::now(),
        }
    }

    /// Set the redemption cap.
    pub fn with_usage_limit(mut self, limit: i64) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Set the current redemption count.
    pub fn with_used_count(mut self, count: i64) -> Self {
        self.used_count = count;
        self
    }

    /// Set the expiry instant.
    pub fn with_expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Set the minimum order amount.
    pub fn with_min_order_amount(mut self, amount: f64) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    /// Minimum order amount, falling back to [`DEFAULT_MIN_ORDER_AMOUNT`].
    pub fn min_order_or_default(&self) -> f64 {
        self.min_order_amount.unwrap_or(DEFAULT_MIN_ORDER_AMOUNT)
    }
}

/// The single global alert threshold configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AlertThresholds {
    /// Redemption percentage at which to alert (e.g. 80).
    pub redemption_cap_pct: f64,
    /// Alert when a code expires within this many days.
    pub expiry_days_before: i64,
    /// ROI percentage at which to alert.
    pub roi_target_pct: f64,
    /// Ordered admin recipient addresses.
    pub alert_emails: Json<Vec<String>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl AlertThresholds {
    /// Create a threshold configuration.
    pub fn new(
        redemption_cap_pct: f64,
        expiry_days_before: i64,
        roi_target_pct: f64,
        alert_emails: Vec<String>,
    ) -> Self {
        Self {
            redemption_cap_pct,
            expiry_days_before,
            roi_target_pct,
            alert_emails: Json(alert_emails),
            updated_at: Utc::now(),
        }
    }

    /// Recipient addresses as a slice.
    pub fn emails(&self) -> &[String] {
        &self.alert_emails
    }
}

/// The kind of threshold crossing an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// Redemptions reached the configured share of the usage limit.
    RedemptionCap,
    /// The code's expiry instant has passed.
    Expired,
    /// The code expires within the configured day window.
    ExpiringSoon,
    /// Modeled return on investment reached the configured target.
    RoiTarget,
}

impl AlertType {
    /// Get the storage/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedemptionCap => "redemption_cap",
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring_soon",
            Self::RoiTarget => "roi_target",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatched-alert record used for dedup and audit.
///
/// Rows are append-only: written once per confirmed dispatch, never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AlertLogEntry {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Promo code the alert refers to.
    pub promo_code: String,
    /// Alert type name (see [`AlertType::as_str`]).
    pub alert_type: String,
    /// Dispatch timestamp.
    pub sent_at: DateTime<Utc>,
    /// Metric snapshot captured at trigger time.
    pub details: Json<serde_json::Map<String, serde_json::Value>>,
}
