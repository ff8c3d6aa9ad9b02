//! Download-info commands: download, downloads

use super::utils::{self, print_app_info, section, spinner};
use anyhow::Result;
use apk_hub::mirror::mirror_links;
use apk_hub::playstore::details_url;
use apk_hub::{Config, MirrorWriter, PlayStore, Storefront};
use colored::Colorize;

/// Placeholder version the store reports for split/multi-APK apps
const VARIES_WITH_DEVICE: &str = "Varies with device";

pub async fn download(
    config: &Config,
    package_id: &str,
    version: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let store = PlayStore::new(config)?;
    download_with(&store, config, package_id, version, name).await
}

/// Look up details in `store`, then write the info file and print mirrors.
/// A failed lookup still writes the file from the given name and version.
pub(crate) async fn download_with<S: Storefront>(
    store: &S,
    config: &Config,
    package_id: &str,
    version: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let writer = MirrorWriter::new(config);

    println!("\n{} Preparing download for: {}", "📥".bold(), package_id.bold());
    utils::warn_if_not_package_id(package_id);

    let pb = spinner(format!("Fetching details for {}...", package_id));
    let lookup = store.get_details(package_id).await;
    pb.finish_and_clear();

    let (app_name, app_version) = match lookup {
        Ok(app) => {
            print_app_info(&app, None, true);
            let looked_up_version = app.version.filter(|v| v != VARIES_WITH_DEVICE);
            (
                name.map(str::to_string).or(app.title),
                version.map(str::to_string).or(looked_up_version),
            )
        }
        Err(e) => {
            tracing::warn!("Detail lookup for {} failed: {}", package_id, e);
            println!(
                "\n{} Could not fetch app details from Play Store",
                "⚠".yellow()
            );
            (name.map(str::to_string), version.map(str::to_string))
        }
    };

    section("APK Download Information");
    println!("{}: {}", "Package ID".bold(), package_id);
    if let Some(app_name) = &app_name {
        println!("{}: {}", "App Name".bold(), app_name);
    }
    if let Some(app_version) = &app_version {
        println!("{}: {}", "Version".bold(), app_version);
    }

    println!(
        "\n{} Direct APK download from Google Play Store requires:",
        "⚠".yellow()
    );
    println!("   1. Google account authentication");
    println!("   2. Device registration");
    println!("   3. Compliance with Play Store Terms of Service");

    println!("\n{} For automated downloads, consider:", "💡".bold());
    println!("   • gplaycli (requires Google account)");
    println!("   • Third-party APK repositories with APIs");
    println!("   • Aurora Store (open-source Play Store client)");

    match writer.write_download_info(package_id, app_name.as_deref(), app_version.as_deref()) {
        Ok(path) => println!(
            "\n{} Download information saved to: {}",
            "✓".green(),
            path.display().to_string().cyan()
        ),
        Err(e) => println!("\n{} Error creating info file: {}", "✗".red(), e),
    }

    section("APK Mirror Download Links");
    for (mirror, url) in mirror_links(package_id) {
        println!("{}: {}", mirror.bold(), url);
    }
    println!("{}: {}", "Play Store".bold(), details_url(package_id));

    Ok(())
}

pub fn downloads(config: &Config) -> Result<()> {
    let writer = MirrorWriter::new(config);
    let files = writer.list_downloads()?;

    if files.is_empty() {
        println!("\n{} No downloaded files.", "📭".bold());
        return Ok(());
    }

    println!(
        "\n{} Downloaded files in {} ({}):",
        "📂".bold(),
        writer.download_dir().display(),
        files.len()
    );
    for (i, file) in files.iter().enumerate() {
        println!("{}. {}", i + 1, file.display());
    }

    Ok(())
}
