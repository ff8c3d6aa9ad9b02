//! Download-info files and mirror links.
//!
//! Nothing is downloaded here. A `download` writes a small text file with
//! the package id and mirror search URLs so the APK can be fetched by hand.

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::playstore::details_url;
use std::path::{Path, PathBuf};

/// Mirror sites and their search URL templates (`{}` is the package id)
const MIRRORS: [(&str, &str); 4] = [
    ("APKPure", "https://apkpure.com/search?q={}"),
    ("APKMirror", "https://www.apkmirror.com/?s={}"),
    ("Uptodown", "https://en.uptodown.com/android/search?q={}"),
    ("APKMonk", "https://www.apkmonk.com/search/?q={}"),
];

const DISCLAIMER: &str = "Note: Due to Google Play Store restrictions, automated APK downloads
require authentication and device registration. Please use the above
links to download the APK manually or set up gplaycli with your
Google account credentials.";

/// Search URL on each mirror site, in a fixed order
pub fn mirror_links(package_id: &str) -> Vec<(&'static str, String)> {
    MIRRORS
        .iter()
        .map(|(name, template)| (*name, template.replace("{}", package_id)))
        .collect()
}

/// `<package>_<version|latest>_info.txt`
pub fn info_filename(package_id: &str, version: Option<&str>) -> String {
    format!("{}_{}_info.txt", package_id, version.unwrap_or("latest"))
}

/// Contents of a download-info file
pub fn render_download_info(
    package_id: &str,
    app_name: Option<&str>,
    version: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str("APK Download Information\n");
    out.push_str("========================\n\n");
    out.push_str(&format!("Package ID: {}\n", package_id));
    out.push_str(&format!("App Name: {}\n", app_name.unwrap_or("N/A")));
    out.push_str(&format!("Version: {}\n\n", version.unwrap_or("Latest")));

    out.push_str("Download Links:\n");
    for (name, url) in mirror_links(package_id) {
        out.push_str(&format!("- {}: {}\n", name, url));
    }
    out.push_str(&format!("- Play Store: {}\n\n", details_url(package_id)));

    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Package ids and versions end up in a file name; keep them inside the directory
fn check_file_component(value: &str) -> Result<()> {
    if value.is_empty() || value.starts_with('.') || value.contains(['/', '\\', '\0']) {
        return Err(HubError::InvalidFileName(value.to_string()));
    }
    Ok(())
}

pub struct MirrorWriter {
    download_dir: PathBuf,
}

impl MirrorWriter {
    pub fn new(config: &Config) -> Self {
        Self {
            download_dir: config.download_dir.clone(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Write the download-info file and return its path
    pub fn write_download_info(
        &self,
        package_id: &str,
        app_name: Option<&str>,
        version: Option<&str>,
    ) -> Result<PathBuf> {
        check_file_component(package_id)?;
        if let Some(version) = version {
            check_file_component(version)?;
        }

        std::fs::create_dir_all(&self.download_dir)?;

        let path = self.download_dir.join(info_filename(package_id, version));
        std::fs::write(&path, render_download_info(package_id, app_name, version))?;
        tracing::debug!("Wrote {}", path.display());

        Ok(path)
    }

    /// Entries in the download directory, sorted; empty if it doesn't exist
    pub fn list_downloads(&self) -> Result<Vec<PathBuf>> {
        if !self.download_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = std::fs::read_dir(&self.download_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        files.sort();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_links() {
        let links = mirror_links("com.whatsapp");
        assert_eq!(links.len(), 4);
        assert!(links.iter().all(|(_, url)| url.contains("com.whatsapp")));

        let names: Vec<_> = links.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["APKPure", "APKMirror", "Uptodown", "APKMonk"]);
        assert_eq!(links[0].1, "https://apkpure.com/search?q=com.whatsapp");
    }

    #[test]
    fn test_info_filename() {
        assert_eq!(
            info_filename("com.example.testapp", Some("1.0.0")),
            "com.example.testapp_1.0.0_info.txt"
        );
        assert_eq!(info_filename("com.whatsapp", None), "com.whatsapp_latest_info.txt");
    }

    #[test]
    fn test_rejects_path_components() {
        let tmp = tempfile::TempDir::new().unwrap();
        let writer = MirrorWriter::new(&Config::with_download_dir(tmp.path()));

        for bad in ["../escape", "a/b", "", ".hidden"] {
            let err = writer.write_download_info(bad, None, None).unwrap_err();
            assert!(matches!(err, HubError::InvalidFileName(_)));
        }
        let err = writer
            .write_download_info("com.example.app", None, Some("../1.0"))
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidFileName(_)));
        assert!(writer.list_downloads().unwrap().is_empty());
    }

    #[test]
    fn test_render_defaults() {
        let text = render_download_info("com.whatsapp", None, None);
        assert!(text.starts_with("APK Download Information\n"));
        assert!(text.contains("App Name: N/A\n"));
        assert!(text.contains("Version: Latest\n"));
        assert!(text.contains("- APKMonk: https://www.apkmonk.com/search/?q=com.whatsapp\n"));
        assert!(text.contains("- Play Store: https://play.google.com/store/apps/details?id=com.whatsapp\n"));
        assert!(text.contains("Note: Due to Google Play Store restrictions"));
    }
}
