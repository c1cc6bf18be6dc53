//! Per-code metric checks.
//!
//! Three independent checks run against each promo code: redemption cap,
//! expiry, and modeled ROI. Each returns a hit carrying the numbers that
//! go into the alert's detail snapshot. All checks are pure functions of
//! the code, the configured thresholds, and the evaluation instant.

use chrono::{DateTime, Utc};
use serde_json::json;

use database::models::{AlertThresholds, AlertType, DiscountType, PromoCode};
use notifier::Details;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Redemption usage crossed the configured share of the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionHit {
    /// Usage percentage, rounded for the snapshot.
    pub pct: i64,
    pub used_count: i64,
    pub usage_limit: i64,
}

/// The code's expiry instant is past or near.
///
/// The two variants are mutually exclusive for a single evaluation
/// instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryHit {
    Expired {
        expires_at: DateTime<Utc>,
    },
    ExpiringSoon {
        days_left: i64,
        expires_at: DateTime<Utc>,
    },
}

/// Modeled return on investment reached the configured target.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiHit {
    /// ROI percentage, rounded.
    pub roi_pct: i64,
    pub discount_given: f64,
    pub revenue_influenced: f64,
}

/// Check redemption usage against the cap threshold.
///
/// Only defined for codes with a usage limit and at least one
/// redemption. The comparison uses the unrounded percentage; the
/// snapshot records the rounded one.
pub fn check_redemption(promo: &PromoCode, cap_pct: f64) -> Option<RedemptionHit> {
    let limit = promo.usage_limit?;
    if limit <= 0 || promo.used_count <= 0 {
        return None;
    }

    let pct = promo.used_count as f64 / limit as f64 * 100.0;
    if pct >= cap_pct {
        Some(RedemptionHit {
            pct: pct.round() as i64,
            used_count: promo.used_count,
            usage_limit: limit,
        })
    } else {
        None
    }
}

/// Check the code's expiry against the current instant.
///
/// A code past its expiry reports [`ExpiryHit::Expired`]; one within
/// `days_before` whole days of it reports [`ExpiryHit::ExpiringSoon`].
/// Remaining time rounds up to whole days, and a code exactly at the
/// boundary counts as expired, so the two can never both apply.
pub fn check_expiry(
    promo: &PromoCode,
    now: DateTime<Utc>,
    days_before: i64,
) -> Option<ExpiryHit> {
    let expires_at = promo.expires_at?;

    if expires_at < now {
        return Some(ExpiryHit::Expired { expires_at });
    }

    let days_left = days_until(now, expires_at);
    if days_left == 0 {
        return Some(ExpiryHit::Expired { expires_at });
    }
    if days_left <= days_before {
        return Some(ExpiryHit::ExpiringSoon {
            days_left,
            expires_at,
        });
    }

    None
}

/// Check modeled ROI against the target threshold.
///
/// Average discount per redemption is the flat value, or the percentage
/// applied to the minimum order amount. Influenced revenue assumes 1.5
/// times the minimum order per redemption. A code with zero redemptions
/// never fires, whatever the formula would say.
pub fn check_roi(promo: &PromoCode, target_pct: f64) -> Option<RoiHit> {
    if promo.used_count <= 0 {
        return None;
    }

    let min_order = promo.min_order_or_default();
    let avg_discount = match promo.discount_type {
        DiscountType::Flat => promo.discount_value,
        DiscountType::Percentage => promo.discount_value / 100.0 * min_order,
    };

    let used = promo.used_count as f64;
    let discount_given = avg_discount * used;
    let revenue_influenced = min_order * 1.5 * used;

    let roi_pct = if discount_given == 0.0 {
        0
    } else {
        (((revenue_influenced - discount_given) / discount_given) * 100.0).round() as i64
    };

    if roi_pct as f64 >= target_pct {
        Some(RoiHit {
            roi_pct,
            discount_given,
            revenue_influenced,
        })
    } else {
        None
    }
}

/// Whole days until `at`, rounding partial days up. Zero when `at` is
/// not in the future.
fn days_until(now: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    let ms = (at - now).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

impl RedemptionHit {
    /// Detail snapshot for the alert log and notification.
    pub fn details(&self, threshold_pct: f64) -> Details {
        let mut d = Details::new();
        d.insert("currentPct".to_string(), json!(self.pct));
        d.insert("usedCount".to_string(), json!(self.used_count));
        d.insert("usageLimit".to_string(), json!(self.usage_limit));
        d.insert("threshold".to_string(), json!(threshold_pct));
        d
    }
}

impl ExpiryHit {
    /// Which alert this hit raises.
    pub fn alert_type(&self) -> AlertType {
        match self {
            Self::Expired { .. } => AlertType::Expired,
            Self::ExpiringSoon { .. } => AlertType::ExpiringSoon,
        }
    }

    /// Detail snapshot for the alert log and notification.
    pub fn details(&self, threshold_days: i64) -> Details {
        let mut d = Details::new();
        match self {
            Self::Expired { expires_at } => {
                d.insert("expiredAt".to_string(), json!(expires_at.to_rfc3339()));
            }
            Self::ExpiringSoon {
                days_left,
                expires_at,
            } => {
                d.insert("daysLeft".to_string(), json!(days_left));
                d.insert("expiresAt".to_string(), json!(expires_at.to_rfc3339()));
                d.insert("thresholdDays".to_string(), json!(threshold_days));
            }
        }
        d
    }
}

impl RoiHit {
    /// Detail snapshot for the alert log and notification.
    pub fn details(&self, target_pct: f64) -> Details {
        let mut d = Details::new();
        d.insert("roiPct".to_string(), json!(self.roi_pct));
        d.insert("discountGiven".to_string(), json!(self.discount_given));
        d.insert(
            "revenueInfluenced".to_string(),
            json!(self.revenue_influenced),
        );
        d.insert("targetPct".to_string(), json!(target_pct));
        d
    }
}

/// Run all three checks against one promo code.
///
/// Returns the raised alerts in the fixed order redemption cap, expiry,
/// ROI, paired with their detail snapshots. All three can fire for the
/// same code in one pass.
pub fn evaluate(
    promo: &PromoCode,
    thresholds: &AlertThresholds,
    now: DateTime<Utc>,
) -> Vec<(AlertType, Details)> {
    let mut hits = Vec::new();

    if let Some(hit) = check_redemption(promo, thresholds.redemption_cap_pct) {
        hits.push((
            AlertType::RedemptionCap,
            hit.details(thresholds.redemption_cap_pct),
        ));
    }

    if let Some(hit) = check_expiry(promo, now, thresholds.expiry_days_before) {
        hits.push((hit.alert_type(), hit.details(thresholds.expiry_days_before)));
    }

    if let Some(hit) = check_roi(promo, thresholds.roi_target_pct) {
        hits.push((AlertType::RoiTarget, hit.details(thresholds.roi_target_pct)));
    }

    hits
}
