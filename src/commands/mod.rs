//! Command implementations for the apk-hub CLI
//!
//! - **query**: search, info and similar (Play Store lookups and Gemini)
//! - **download**: download-info files and the downloads listing
//! - **completions**: shell completion scripts
//! - **utils**: shared output helpers (internal)

pub mod completions;
pub mod download;
pub mod query;
pub(crate) mod utils;

pub use completions::completions;
pub use download::{download, downloads};
pub use query::{SearchOptions, info, search, similar};
