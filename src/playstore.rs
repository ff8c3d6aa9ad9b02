//! Google Play metadata client.
//!
//! Play Store pages embed their data as JSON blobs passed to
//! `AF_initDataCallback({key: 'ds:N', ..., data: [...], sideChannel: {}});`.
//! This module pulls those datasets out of the HTML and maps the nested
//! arrays onto [`AppRecord`] fields using JSON pointers.
//!
//! # Examples
//!
//! ```no_run
//! use apk_hub::{Config, PlayStore, Storefront};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = PlayStore::new(&Config::load())?;
//!     let app = store.get_details("com.whatsapp").await?;
//!     println!("{} {}", app.title_or_unknown(), app.version.as_deref().unwrap_or("?"));
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::record::AppRecord;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

pub const PLAY_STORE_BASE: &str = "https://play.google.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const LANGUAGE: &str = "en";
const COUNTRY: &str = "us";

static DATASET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)AF_initDataCallback\(\{key:\s*'(ds:\d+)'.*?data:(.*?), sideChannel: \{\}\}\);")
        .expect("dataset regex is valid")
});

static DETAILS_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/store/apps/details\?id=([a-zA-Z0-9._]+)").expect("details link regex is valid")
});

static PACKAGE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z0-9_]+)+$").expect("package id regex is valid")
});

/// Where each detail field lives inside the detail dataset
mod details_path {
    pub const TITLE: &str = "/1/2/0/0";
    pub const DESCRIPTION: &str = "/1/2/72/0/1";
    pub const DEVELOPER: &str = "/1/2/68/0";
    pub const DEVELOPER_LINK: &str = "/1/2/68/1/4/2";
    pub const ICON: &str = "/1/2/95/0/3/2";
    pub const SCORE: &str = "/1/2/51/0/1";
    pub const RATINGS: &str = "/1/2/51/2/1";
    pub const REVIEWS: &str = "/1/2/51/3/1";
    pub const INSTALLS: &str = "/1/2/13/0";
    pub const MIN_INSTALLS: &str = "/1/2/13/1";
    pub const VERSION: &str = "/1/2/140/0/0/0";
    pub const UPDATED: &str = "/1/2/145/0/1/0";
    pub const ANDROID_VERSION: &str = "/1/2/140/1/1/0/0/1";
    pub const CONTENT_RATING: &str = "/1/2/9/0";
    pub const GENRE: &str = "/1/2/79/0/0/0";
    pub const PRICE_MICROS: &str = "/1/2/57/0/0/0/0/1/0/0";
    pub const CURRENCY: &str = "/1/2/57/0/0/0/0/1/0/1";
}

/// Where each field lives inside one search-result entry
mod search_path {
    pub const APP_ID: &str = "/12/0";
    pub const TITLE: &str = "/2";
    pub const DEVELOPER: &str = "/4/0/0/0";
    pub const ICON: &str = "/1/1/0/3/2";
    pub const SCORE: &str = "/6/0/2/1/1";
    pub const PRICE_MICROS: &str = "/7/0/3/2/1/0/0";
    pub const CURRENCY: &str = "/7/0/3/2/1/0/1";
}

/// Storefront lookups used by the finder
#[allow(async_fn_in_trait)]
pub trait Storefront {
    /// Search by free text, returning partial records
    async fn search_by_name(&self, name: &str, max_results: usize) -> Result<Vec<AppRecord>>;

    /// Full detail record for one package identifier
    async fn get_details(&self, package_id: &str) -> Result<AppRecord>;
}

/// Play Store scraping client
#[derive(Clone)]
pub struct PlayStore {
    client: reqwest::Client,
    base_url: String,
}

impl PlayStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: PLAY_STORE_BASE.to_string(),
        })
    }

    async fn fetch_page(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("hl", LANGUAGE), ("gl", COUNTRY)])
            .send()
            .await?;
        Ok(response)
    }
}

impl Storefront for PlayStore {
    async fn search_by_name(&self, name: &str, max_results: usize) -> Result<Vec<AppRecord>> {
        let html = self
            .fetch_page("/store/search", &[("q", name), ("c", "apps")])
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_search_results(&html, max_results))
    }

    async fn get_details(&self, package_id: &str) -> Result<AppRecord> {
        let response = self
            .fetch_page("/store/apps/details", &[("id", package_id)])
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HubError::AppNotFound(package_id.to_string()));
        }

        let html = response.error_for_status()?.text().await?;
        parse_details(&html, package_id)
    }
}

/// Canonical Play Store URL for a package
pub fn details_url(package_id: &str) -> String {
    format!("{}/store/apps/details?id={}", PLAY_STORE_BASE, package_id)
}

/// Loose reverse-domain check (`com.example.app`)
pub fn looks_like_package_id(candidate: &str) -> bool {
    PACKAGE_ID_RE.is_match(candidate)
}

/// Extract every `AF_initDataCallback` dataset from a page, keyed by `ds:N`.
/// Blobs that fail to parse are skipped.
pub fn extract_datasets(html: &str) -> Vec<(String, Value)> {
    DATASET_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            match serde_json::from_str::<Value>(caps.get(2)?.as_str()) {
                Ok(data) => Some((key, data)),
                Err(e) => {
                    tracing::debug!("Skipping unparseable dataset {}: {}", key, e);
                    None
                }
            }
        })
        .collect()
}

/// Map a detail page onto an [`AppRecord`]
pub fn parse_details(html: &str, package_id: &str) -> Result<AppRecord> {
    let datasets = extract_datasets(html);

    // ds:5 has held the detail payload for years, but keys do shift
    let data = datasets
        .iter()
        .filter(|(_, data)| str_at(data, details_path::TITLE).is_some())
        .min_by_key(|(key, _)| key != "ds:5")
        .map(|(_, data)| data)
        .ok_or_else(|| HubError::Parse(format!("no app details found for {}", package_id)))?;

    let price = price_at(data, details_path::PRICE_MICROS);

    Ok(AppRecord {
        app_id: Some(package_id.to_string()),
        title: str_at(data, details_path::TITLE),
        description: str_at(data, details_path::DESCRIPTION),
        developer: str_at(data, details_path::DEVELOPER),
        developer_id: str_at(data, details_path::DEVELOPER_LINK)
            .and_then(|link| link.split("id=").nth(1).map(str::to_string)),
        icon: str_at(data, details_path::ICON),
        score: data.pointer(details_path::SCORE).and_then(Value::as_f64),
        ratings: data.pointer(details_path::RATINGS).and_then(Value::as_u64),
        reviews: data.pointer(details_path::REVIEWS).and_then(Value::as_u64),
        installs: str_at(data, details_path::INSTALLS),
        min_installs: data.pointer(details_path::MIN_INSTALLS).and_then(Value::as_u64),
        version: str_at(data, details_path::VERSION)
            .or_else(|| Some("Varies with device".to_string())),
        updated: data.pointer(details_path::UPDATED).and_then(Value::as_i64),
        android_version: str_at(data, details_path::ANDROID_VERSION),
        content_rating: str_at(data, details_path::CONTENT_RATING),
        genre: str_at(data, details_path::GENRE),
        free: Some(price.is_none_or(|p| p == 0.0)),
        price,
        currency: str_at(data, details_path::CURRENCY),
        url: Some(details_url(package_id)),
    })
}

/// Map a search page onto partial records, at most `max_results`.
///
/// Falls back to bare identifiers scraped from detail links when no
/// structured entries are present.
pub fn parse_search_results(html: &str, max_results: usize) -> Vec<AppRecord> {
    let mut entries = Vec::new();
    for (_, data) in extract_datasets(html) {
        collect_search_entries(&data, &mut entries);
    }

    let mut results: Vec<AppRecord> = Vec::new();
    for entry in entries {
        if results.len() >= max_results {
            break;
        }
        if !results.iter().any(|r| r.app_id == entry.app_id) {
            results.push(entry);
        }
    }

    if results.is_empty() {
        for caps in DETAILS_LINK_RE.captures_iter(html) {
            if results.len() >= max_results {
                break;
            }
            let id = &caps[1];
            if !results.iter().any(|r| r.app_id.as_deref() == Some(id)) {
                results.push(AppRecord::with_id(id));
            }
        }
    }

    results
}

/// Depth-first walk collecting arrays shaped like a search hit
fn collect_search_entries(value: &Value, out: &mut Vec<AppRecord>) {
    let Value::Array(items) = value else {
        return;
    };

    if let Some(record) = search_entry(value) {
        out.push(record);
        return;
    }

    for item in items {
        collect_search_entries(item, out);
    }
}

fn search_entry(entry: &Value) -> Option<AppRecord> {
    let app_id = str_at(entry, search_path::APP_ID).filter(|id| looks_like_package_id(id))?;
    let title = str_at(entry, search_path::TITLE)?;
    let price = price_at(entry, search_path::PRICE_MICROS);

    Some(AppRecord {
        url: Some(details_url(&app_id)),
        app_id: Some(app_id),
        title: Some(title),
        developer: str_at(entry, search_path::DEVELOPER),
        icon: str_at(entry, search_path::ICON),
        score: entry.pointer(search_path::SCORE).and_then(Value::as_f64),
        free: Some(price.is_none_or(|p| p == 0.0)),
        price,
        currency: str_at(entry, search_path::CURRENCY),
        ..Default::default()
    })
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Prices are reported in micros
fn price_at(value: &Value, pointer: &str) -> Option<f64> {
    value
        .pointer(pointer)
        .and_then(Value::as_f64)
        .map(|micros| micros / 1_000_000.0)
}
