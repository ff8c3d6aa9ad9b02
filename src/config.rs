//! Runtime configuration read from the environment.
//!
//! A [`Config`] is built once in `main` and handed by reference to every
//! client constructor, so nothing below this module touches `std::env`.
//!
//! Values come from the process environment first; anything unset there is
//! taken from a `.env` file (searched from the working directory upwards).
//!
//! **Environment Variables**:
//! - `GEMINI_API_KEY`: Gemini credential; enrichment is disabled without it
//! - `GEMINI_MODEL`: model used for `generateContent`
//! - `USER_AGENT`: sent on every outbound request
//! - `APK_HUB_DOWNLOAD_DIR`: where download-info files are written

use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub user_agent: String,
    pub download_dir: PathBuf,
}

impl Config {
    /// Environment variables, then `.env`, then defaults
    pub fn load() -> Self {
        let file_vars = match dotenvy::dotenv_iter() {
            Ok(iter) => collect_dotenv(iter),
            Err(e) => {
                tracing::debug!("No .env file loaded: {}", e);
                HashMap::new()
            }
        };

        Self::from_lookup(|name| env_var(name).or_else(|| non_empty(file_vars.get(name).cloned())))
    }

    /// Build a configuration from environment variables only
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Build a configuration from any name -> value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            gemini_api_key: lookup("GEMINI_API_KEY"),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            user_agent: lookup("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            download_dir: lookup("APK_HUB_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        }
    }

    /// Defaults with an explicit output directory and no Gemini key
    pub fn with_download_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Create the download directory if it doesn't exist
    pub fn ensure_download_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.download_dir)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_download_dir(DEFAULT_DOWNLOAD_DIR)
    }
}

/// Variables from a `.env` file; malformed lines are skipped
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => collect_dotenv(iter),
        Err(_) => HashMap::new(),
    }
}

fn collect_dotenv<R: std::io::Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    iter.filter_map(|item| match item {
        Ok(pair) => Some(pair),
        Err(e) => {
            tracing::warn!("Skipping malformed .env entry: {}", e);
            None
        }
    })
    .collect()
}

fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.download_dir, PathBuf::from("downloads"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_dotenv_file_supplies_values() {
        let tmp = tempfile::TempDir::new().unwrap();
        let env_file = tmp.path().join(".env");
        std::fs::write(
            &env_file,
            "GEMINI_API_KEY=from-file\nUSER_AGENT=\"apk-hub tests\"\n# comment\nAPK_HUB_DOWNLOAD_DIR=out\n",
        )
        .unwrap();

        let vars = read_dotenv(&env_file);
        assert_eq!(vars.get("GEMINI_API_KEY").map(String::as_str), Some("from-file"));

        let config = Config::from_lookup(|name| non_empty(vars.get(name).cloned()));
        assert_eq!(config.gemini_api_key.as_deref(), Some("from-file"));
        assert_eq!(config.user_agent, "apk-hub tests");
        assert_eq!(config.download_dir, PathBuf::from("out"));
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_missing_dotenv_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(read_dotenv(&tmp.path().join(".env")).is_empty());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(|_| non_empty(Some("   ".to_string())));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_ensure_download_dir_creates_nested() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        let config = Config::with_download_dir(&dir);

        config.ensure_download_dir().unwrap();
        assert!(dir.is_dir());

        // Idempotent
        config.ensure_download_dir().unwrap();
    }
}
