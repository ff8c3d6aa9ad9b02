//! Example: Complete lookup-to-download workflow
//!
//! This example demonstrates the full flow the CLI runs for one app:
//! 1. Resolve the app by name (web search fallback included)
//! 2. Fetch full details for the best match
//! 3. Ask Gemini for insights, a safety review and similar apps (if configured)
//! 4. Write the download-info file and print mirror links
//!
//! Usage: cargo run --example workflow [app_name]

use apk_hub::playstore::details_url;
use apk_hub::{AppFinder, Config, Enricher, GoogleSearch, MirrorWriter, PlayStore, Storefront, mirror_links};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let app_name = if args.len() > 1 {
        args[1].clone()
    } else {
        "VLC".to_string()
    };

    let config = Config::load();
    config.ensure_download_dir()?;

    // Step 1: resolve the name
    println!("==> Searching for '{}'", app_name);
    let store = PlayStore::new(&config)?;
    let finder = AppFinder::new(PlayStore::new(&config)?, GoogleSearch::new(&config)?);
    let results = finder.find_app(&app_name, false).await;

    let Some(package_id) = results.first().and_then(|app| app.app_id.clone()) else {
        println!("No apps found matching '{}'", app_name);
        return Ok(());
    };
    println!("    Best match: {}", package_id);

    // Step 2: full details
    println!("\n==> Fetching details for {}", package_id);
    let app = match store.get_details(&package_id).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("    Detail lookup failed: {}", e);
            results[0].clone()
        }
    };
    println!("    {} by {}", app.title_or_unknown(), app.developer_or_unknown());
    println!("    Version: {}", app.version.as_deref().unwrap_or("N/A"));
    if let Some(updated) = app.updated_display() {
        println!("    Updated: {}", updated);
    }

    // Step 3: optional enrichment
    let enricher = Enricher::from_config(&config);
    if enricher.is_available() {
        println!("\n==> Asking Gemini");
        if let Ok(Some(text)) = enricher.app_insights(&app).await {
            println!("Insights:\n{}\n", text);
        }
        if let Ok(Some(text)) = enricher.analyze_safety(&app).await {
            println!("Safety:\n{}\n", text);
        }
        if let Ok(Some(text)) = enricher
            .app_recommendations(app.title_or_unknown(), app.genre.as_deref())
            .await
        {
            println!("Similar apps:\n{}", text);
        }
    } else {
        println!("\n==> Skipping Gemini (GEMINI_API_KEY not set)");
    }

    // Step 4: download info
    println!("\n==> Writing download info");
    let writer = MirrorWriter::new(&config);
    let version = app.version.as_deref().filter(|v| *v != "Varies with device");
    let path = writer.write_download_info(&package_id, app.title.as_deref(), version)?;
    println!("    Saved to {}", path.display());

    for (mirror, url) in mirror_links(&package_id) {
        println!("    {:<10} {}", mirror, url);
    }
    println!("    {:<10} {}", "Play Store", details_url(&package_id));

    Ok(())
}
