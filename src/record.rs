//! App metadata as returned by the storefront

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Flat metadata record for one Play Store app.
///
/// Every field is optional: search hits only carry a handful of them and
/// detail pages routinely omit some (paid apps without installs, etc.).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_installs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Last update as unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AppRecord {
    /// Record carrying only a package identifier
    pub fn with_id(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            ..Default::default()
        }
    }

    pub fn title_or_unknown(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    pub fn developer_or_unknown(&self) -> &str {
        self.developer.as_deref().unwrap_or("Unknown")
    }

    pub fn is_free(&self) -> bool {
        self.free.unwrap_or(false)
    }

    /// "Free" for missing or zero prices, otherwise e.g. "4.99 USD"
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) if price > 0.0 => match &self.currency {
                Some(currency) => format!("{:.2} {}", price, currency),
                None => format!("{:.2}", price),
            },
            _ => "Free".to_string(),
        }
    }

    pub fn updated_display(&self) -> Option<String> {
        let ts = self.updated?;
        DateTime::from_timestamp(ts, 0).map(|dt| dt.format("%b %d, %Y").to_string())
    }

    /// Description cut at `limit` chars, with "..." appended when cut
    pub fn short_description(&self, limit: usize) -> Option<String> {
        let desc = self.description.as_deref()?;
        Some(truncate_chars(desc, limit, "..."))
    }
}

/// Truncate on a char boundary; `suffix` is appended only if something was cut.
pub fn truncate_chars(text: &str, limit: usize, suffix: &str) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}{}", &text[..idx], suffix),
        None => text.to_string(),
    }
}
