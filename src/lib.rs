//! Library interface for apk-hub
//!
//! Play Store lookup, web search fallback, Gemini enrichment and mirror
//! download-info files. The `apk-hub` binary is a thin CLI over these.

pub mod config;
pub mod enrich;
pub mod error;
pub mod finder;
pub mod mirror;
pub mod playstore;
pub mod record;
pub mod websearch;

// Re-export commonly used types
pub use config::Config;
pub use enrich::Enricher;
pub use error::{HubError, Result};
pub use finder::AppFinder;
pub use mirror::{MirrorWriter, mirror_links};
pub use playstore::{PlayStore, Storefront};
pub use record::AppRecord;
pub use websearch::{GoogleSearch, WebSearch};
