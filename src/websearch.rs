//! Web search fallback restricted to the Play Store domain
//!
//! Used when the storefront's own search comes back empty: the engine's
//! result links are scanned for `id=<package>` and the identifiers are
//! handed back for detail lookups.

use crate::config::Config;
use crate::error::Result;
use crate::playstore::REQUEST_TIMEOUT;
use regex::Regex;
use std::sync::LazyLock;

pub const SEARCH_ENGINE_URL: &str = "https://www.google.com/search";
pub const STOREFRONT_DOMAIN: &str = "play.google.com";

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]+)""#).expect("href regex is valid"));

static ID_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=([a-zA-Z0-9._]+)").expect("id regex is valid"));

#[allow(async_fn_in_trait)]
pub trait WebSearch {
    /// Package identifiers found in results for `"<query> site:play.google.com"`
    async fn search_google(&self, query: &str, max_results: usize) -> Result<Vec<String>>;
}

#[derive(Clone)]
pub struct GoogleSearch {
    client: reqwest::Client,
}

impl GoogleSearch {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

impl WebSearch for GoogleSearch {
    async fn search_google(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let search_query = site_query(query);
        let num = max_results.to_string();
        tracing::debug!("Web search: {}", search_query);

        let html = self
            .client
            .get(SEARCH_ENGINE_URL)
            .query(&[("q", search_query.as_str()), ("num", num.as_str()), ("hl", "en")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let urls: Vec<String> = result_urls(&html).into_iter().take(max_results).collect();
        Ok(extract_package_ids(&urls))
    }
}

pub fn site_query(query: &str) -> String {
    format!("{} site:{}", query, STOREFRONT_DOMAIN)
}

/// Storefront result URLs from a results page, in page order.
///
/// Unwraps the engine's `/url?q=<target>` redirect links.
pub fn result_urls(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps[1].replace("&amp;", "&");
            let target = if href.starts_with("/url?") {
                let redirect = reqwest::Url::parse(&format!("https://www.google.com{}", href)).ok()?;
                redirect
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.into_owned())?
            } else {
                href
            };

            let url = reqwest::Url::parse(&target).ok()?;
            (url.host_str() == Some(STOREFRONT_DOMAIN)).then_some(target)
        })
        .collect()
}

/// The `id=` value of each URL; URLs without one are skipped, duplicates kept
pub fn extract_package_ids<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    urls.iter()
        .filter_map(|url| {
            ID_PARAM_RE
                .captures(url.as_ref())
                .map(|caps| caps[1].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_query() {
        assert_eq!(site_query("WhatsApp"), "WhatsApp site:play.google.com");
    }

    #[test]
    fn test_extract_package_ids_keeps_order_and_duplicates() {
        let urls = [
            "https://play.google.com/store/apps/details?id=com.whatsapp",
            "https://play.google.com/store/apps/developer?name=WhatsApp",
            "https://play.google.com/store/apps/details?id=com.whatsapp.w4b&hl=en",
            "https://play.google.com/store/apps/details?id=com.whatsapp",
        ];
        assert_eq!(
            extract_package_ids(&urls),
            vec!["com.whatsapp", "com.whatsapp.w4b", "com.whatsapp"]
        );
    }

    #[test]
    fn test_result_urls_unwraps_redirects_and_filters_domain() {
        let html = r#"
            <a href="/url?q=https://play.google.com/store/apps/details%3Fid%3Dcom.whatsapp&amp;sa=U">WhatsApp</a>
            <a href="https://www.whatsapp.com/">Site</a>
            <a href="https://play.google.com/store/apps/details?id=org.telegram.messenger&amp;hl=en">Telegram</a>
            <a href="/search?q=more">More</a>
        "#;
        let urls = result_urls(html);
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://play.google.com/store/apps/details?id=com.whatsapp");
        assert_eq!(
            extract_package_ids(&urls),
            vec!["com.whatsapp", "org.telegram.messenger"]
        );
    }
}
