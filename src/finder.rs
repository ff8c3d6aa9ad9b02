//! App lookup by name or package identifier, with web search fallback

use crate::playstore::Storefront;
use crate::record::AppRecord;
use crate::websearch::WebSearch;

/// Records requested from the storefront's own name search
pub const NAME_SEARCH_RESULTS: usize = 5;

/// Detail lookups attempted from web search hits
pub const FALLBACK_LOOKUPS: usize = 5;

pub struct AppFinder<S, W> {
    store: S,
    web: W,
}

impl<S: Storefront, W: WebSearch> AppFinder<S, W> {
    pub fn new(store: S, web: W) -> Self {
        Self { store, web }
    }

    /// Find apps by package identifier or by name.
    ///
    /// Never fails: lookup errors are logged and treated as "no data".
    /// A name search returns at most [`NAME_SEARCH_RESULTS`] records.
    /// One that comes back empty falls back to web search and
    /// resolves up to [`FALLBACK_LOOKUPS`] of the discovered identifiers,
    /// in discovery order.
    pub async fn find_app(&self, query: &str, by_package_id: bool) -> Vec<AppRecord> {
        if by_package_id {
            return match self.store.get_details(query).await {
                Ok(app) => vec![app],
                Err(e) => {
                    tracing::warn!("Detail lookup for {} failed: {}", query, e);
                    Vec::new()
                }
            };
        }

        match self.store.search_by_name(query, NAME_SEARCH_RESULTS).await {
            Ok(results) if !results.is_empty() => return results,
            Ok(_) => tracing::info!("No Play Store results for '{}', trying web search", query),
            Err(e) => tracing::warn!("Play Store search for '{}' failed: {}", query, e),
        }

        let package_ids = match self.web.search_google(query, FALLBACK_LOOKUPS).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Web search for '{}' failed: {}", query, e);
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        for package_id in package_ids.iter().take(FALLBACK_LOOKUPS) {
            match self.store.get_details(package_id).await {
                Ok(app) => results.push(app),
                Err(e) => tracing::warn!("Detail lookup for {} failed: {}", package_id, e),
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HubError, Result};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeStore {
        search_hits: Vec<AppRecord>,
        search_fails: bool,
        details: HashMap<String, AppRecord>,
        detail_calls: RefCell<Vec<String>>,
    }

    impl FakeStore {
        fn with_details(ids: &[&str]) -> Self {
            let details = ids
                .iter()
                .map(|id| {
                    let mut app = AppRecord::with_id(*id);
                    app.title = Some(format!("Title of {}", id));
                    (id.to_string(), app)
                })
                .collect();
            Self {
                details,
                ..Default::default()
            }
        }
    }

    impl Storefront for FakeStore {
        async fn search_by_name(&self, _name: &str, max_results: usize) -> Result<Vec<AppRecord>> {
            if self.search_fails {
                return Err(HubError::Parse("boom".to_string()));
            }
            Ok(self.search_hits.iter().take(max_results).cloned().collect())
        }

        async fn get_details(&self, package_id: &str) -> Result<AppRecord> {
            self.detail_calls.borrow_mut().push(package_id.to_string());
            self.details
                .get(package_id)
                .cloned()
                .ok_or_else(|| HubError::AppNotFound(package_id.to_string()))
        }
    }

    struct FakeWeb {
        ids: Vec<String>,
        called: RefCell<bool>,
    }

    impl FakeWeb {
        fn new(ids: &[&str]) -> Self {
            Self {
                ids: ids.iter().map(|s| s.to_string()).collect(),
                called: RefCell::new(false),
            }
        }
    }

    impl WebSearch for FakeWeb {
        async fn search_google(&self, _query: &str, _max_results: usize) -> Result<Vec<String>> {
            *self.called.borrow_mut() = true;
            Ok(self.ids.clone())
        }
    }

    fn ids(apps: &[AppRecord]) -> Vec<&str> {
        apps.iter().filter_map(|a| a.app_id.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_by_package_id_found() {
        let finder = AppFinder::new(FakeStore::with_details(&["com.whatsapp"]), FakeWeb::new(&[]));
        let results = finder.find_app("com.whatsapp", true).await;
        assert_eq!(ids(&results), vec!["com.whatsapp"]);
    }

    #[tokio::test]
    async fn test_by_package_id_missing_is_empty() {
        let finder = AppFinder::new(FakeStore::default(), FakeWeb::new(&["com.other"]));
        let results = finder.find_app("com.missing.app", true).await;
        assert!(results.is_empty());
        // Package-id mode never consults web search
        assert!(!*finder.web.called.borrow());
    }

    #[tokio::test]
    async fn test_name_search_hits_skip_fallback() {
        let store = FakeStore {
            search_hits: vec![AppRecord::with_id("com.a"), AppRecord::with_id("com.b")],
            ..Default::default()
        };
        let finder = AppFinder::new(store, FakeWeb::new(&["com.c"]));
        let results = finder.find_app("anything", false).await;
        assert_eq!(ids(&results), vec!["com.a", "com.b"]);
        assert!(!*finder.web.called.borrow());
    }

    #[tokio::test]
    async fn test_name_search_limited_to_five() {
        let store = FakeStore {
            search_hits: (0..20)
                .map(|i| AppRecord::with_id(format!("com.chat.app{}", i)))
                .collect(),
            ..Default::default()
        };
        let finder = AppFinder::new(store, FakeWeb::new(&[]));

        let results = finder.find_app("chat", false).await;
        assert_eq!(results.len(), NAME_SEARCH_RESULTS);
        assert_eq!(ids(&results)[0], "com.chat.app0");
        assert_eq!(ids(&results)[4], "com.chat.app4");
    }

    #[tokio::test]
    async fn test_empty_search_falls_back_in_discovery_order() {
        let store = FakeStore::with_details(&["com.first", "com.second", "com.third"]);
        let web = FakeWeb::new(&["com.second", "com.unknown", "com.first", "com.third"]);
        let finder = AppFinder::new(store, web);

        let results = finder.find_app("messenger", false).await;
        assert!(*finder.web.called.borrow());
        assert_eq!(ids(&results), vec!["com.second", "com.first", "com.third"]);
    }

    #[tokio::test]
    async fn test_fallback_caps_lookups_at_five() {
        let all = ["a.one", "a.two", "a.three", "a.four", "a.five", "a.six", "a.seven"];
        let finder = AppFinder::new(FakeStore::with_details(&all), FakeWeb::new(&all));

        let results = finder.find_app("many", false).await;
        assert_eq!(results.len(), 5);
        assert_eq!(finder.store.detail_calls.borrow().len(), 5);
        assert_eq!(ids(&results), all[..5].to_vec());
    }

    #[tokio::test]
    async fn test_failed_search_still_falls_back() {
        let mut store = FakeStore::with_details(&["com.found"]);
        store.search_fails = true;
        let finder = AppFinder::new(store, FakeWeb::new(&["com.found"]));

        let results = finder.find_app("broken", false).await;
        assert_eq!(ids(&results), vec!["com.found"]);
    }
}
