//! Alert message rendering.
//!
//! Turns a decided alert into a subject line plus HTML and plain-text
//! bodies. Rendering is a pure function of the notice contents; the only
//! ambient input is the render timestamp stamped into the footer.

use chrono::Utc;

use crate::sink::AlertNotice;

/// Fixed presentation template for one alert type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertStyle {
    /// Headline shown in the subject and message header.
    pub title: &'static str,
    /// Emoji marker prepended to the subject.
    pub icon: &'static str,
    /// Header background color (CSS hex).
    pub color: &'static str,
}

/// Look up the template for an alert type.
///
/// Unrecognized types get a neutral fallback so new alert types render
/// without code changes here.
pub fn style_for(alert_type: &str) -> AlertStyle {
    match alert_type {
        "redemption_cap" => AlertStyle {
            title: "Redemption Cap Reached",
            icon: "\u{26A0}\u{FE0F}",
            color: "#d97706",
        },
        "expired" => AlertStyle {
            title: "Promo Code Expired",
            icon: "\u{1F6D1}",
            color: "#dc2626",
        },
        "expiring_soon" => AlertStyle {
            title: "Promo Code Expiring Soon",
            icon: "\u{23F3}",
            color: "#ea580c",
        },
        "roi_target" => AlertStyle {
            title: "ROI Target Reached",
            icon: "\u{1F3AF}",
            color: "#16a34a",
        },
        _ => AlertStyle {
            title: "Promo Code Alert",
            icon: "\u{1F4E3}",
            color: "#475569",
        },
    }
}

/// A rendered alert message ready to hand to a mail transport.
#[derive(Debug, Clone)]
pub struct RenderedAlert {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative body.
    pub text: String,
}

/// Render a notice into subject, HTML, and text bodies.
///
/// Every key in the details payload is interpolated into a two-column
/// table; keys are humanized from camelCase for display.
pub fn render_alert(notice: &AlertNotice) -> RenderedAlert {
    let style = style_for(&notice.alert_type);
    let rendered_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let subject = format!("{} {}: {}", style.icon, style.title, notice.promo_code);

    let html = render_html(notice, &style, &rendered_at);
    let text = render_text(notice, &style, &rendered_at);

    RenderedAlert { subject, html, text }
}

fn render_html(notice: &AlertNotice, style: &AlertStyle, rendered_at: &str) -> String {
    let mut rows = String::new();
    for (key, value) in &notice.details {
        rows.push_str(&format!(
            "<tr>\
             <td style=\"padding: 6px 12px; border-bottom: 1px solid #e5e7eb; color: #6b7280;\">{}</td>\
             <td style=\"padding: 6px 12px; border-bottom: 1px solid #e5e7eb;\"><strong>{}</strong></td>\
             </tr>",
            escape_html(&humanize_key(key)),
            escape_html(&format_value(value)),
        ));
    }

    format!(
        "<div style=\"font-family: Arial, Helvetica, sans-serif; max-width: 560px; margin: 0 auto;\">\
         <div style=\"background: {color}; color: #ffffff; padding: 16px 20px; border-radius: 6px 6px 0 0;\">\
         <h2 style=\"margin: 0; font-size: 18px;\">{icon} {title}</h2>\
         </div>\
         <div style=\"border: 1px solid #e5e7eb; border-top: none; padding: 20px; border-radius: 0 0 6px 6px;\">\
         <p style=\"margin-top: 0;\">Promo code <strong>{code}</strong></p>\
         <table style=\"width: 100%; border-collapse: collapse; font-size: 14px;\">{rows}</table>\
         <p style=\"color: #9ca3af; font-size: 12px; margin-bottom: 0;\">Generated at {ts}</p>\
         </div>\
         </div>",
        color = style.color,
        icon = style.icon,
        title = style.title,
        code = escape_html(&notice.promo_code),
        rows = rows,
        ts = rendered_at,
    )
}

fn render_text(notice: &AlertNotice, style: &AlertStyle, rendered_at: &str) -> String {
    let mut body = format!("{}\n\nPromo code: {}\n", style.title, notice.promo_code);
    for (key, value) in &notice.details {
        body.push_str(&format!("{}: {}\n", humanize_key(key), format_value(value)));
    }
    body.push_str(&format!("\nGenerated at {}\n", rendered_at));
    body
}

/// Convert a camelCase details key to a spaced, capitalized label.
///
/// `currentPct` becomes `Current Pct`, `daysLeft` becomes `Days Left`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Render a JSON detail value for display.
///
/// Strings render without quotes; everything else uses its JSON form.
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
