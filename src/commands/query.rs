//! Lookup commands: search, info, similar

use super::utils::{self, print_app_info, section, spinner};
use anyhow::{Result, bail};
use apk_hub::{AppRecord, Config, Enricher, HubError, PlayStore, Storefront};
use colored::Colorize;

pub struct SearchOptions {
    pub by_package_id: bool,
    pub detailed: bool,
    pub gemini: bool,
    pub json: bool,
}

pub async fn search(config: &Config, query: &str, opts: SearchOptions) -> Result<()> {
    let finder = utils::finder(config)?;

    if !opts.json {
        println!("\n{} Searching for: {}", "🔍".bold(), query.bold());
        println!(
            "   Search mode: {}",
            if opts.by_package_id { "Package ID" } else { "App Name" }
        );
    }

    let pb = spinner(format!("Searching for '{}'...", query));
    let results = finder.find_app(query, opts.by_package_id).await;
    pb.finish_and_clear();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("\n{} No apps found.", "✗".red());
        return Ok(());
    }

    println!("\n{} Found {} app(s):", "✓".green(), results.len());

    if opts.gemini && !opts.detailed {
        println!(
            "{} --gemini only applies together with --detailed",
            "⚠".yellow()
        );
    }
    let enricher = (opts.gemini && opts.detailed).then(|| Enricher::from_config(config));

    for (i, app) in results.iter().enumerate() {
        print_app_info(app, Some(i + 1), opts.detailed);

        if let Some(enricher) = enricher.as_ref().filter(|e| e.is_available()) {
            print_insights(enricher, app).await;
            print_safety(enricher, app).await;
        }
    }

    Ok(())
}

pub async fn info(config: &Config, package_id: &str, json: bool) -> Result<()> {
    let store = PlayStore::new(config)?;
    info_with(&store, config, package_id, json).await
}

pub(crate) async fn info_with<S: Storefront>(
    store: &S,
    config: &Config,
    package_id: &str,
    json: bool,
) -> Result<()> {
    if !json {
        println!("\n{} Fetching information for: {}", "📋".bold(), package_id.bold());
        utils::warn_if_not_package_id(package_id);
    }

    let pb = spinner(format!("Fetching details for {}...", package_id));
    let lookup = store.get_details(package_id).await;
    pb.finish_and_clear();

    let app = match lookup {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!("Detail lookup for {} failed: {}", package_id, e);
            if json {
                println!("{}", not_found_json(package_id));
            } else {
                println!("\n{} App not found.", "✗".red());
            }
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&app)?);
        return Ok(());
    }

    print_app_info(&app, None, true);

    let enricher = Enricher::from_config(config);
    if !enricher.is_available() {
        return Ok(());
    }

    section("🤖 Gemini AI Insights");
    print_insights(&enricher, &app).await;
    print_safety(&enricher, &app).await;

    let pb = spinner("Finding similar apps...".to_string());
    let recommendations = enricher
        .app_recommendations(app.title.as_deref().unwrap_or(""), app.genre.as_deref())
        .await;
    pb.finish_and_clear();

    match recommendations {
        Ok(Some(text)) => {
            println!("\n{} {}", "💡".bold(), "Similar Apps:".bold());
            println!("{}", text);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Gemini recommendations failed: {}", e),
    }

    Ok(())
}

pub async fn similar(config: &Config, app_name: &str, category: Option<&str>) -> Result<()> {
    let enricher = Enricher::from_config(config);

    if !enricher.is_available() {
        bail!(HubError::AiUnavailable);
    }

    println!("\n{} Finding apps similar to: {}", "🔄".bold(), app_name.bold());

    let pb = spinner("Asking Gemini...".to_string());
    let recommendations = enricher.app_recommendations(app_name, category).await;
    pb.finish_and_clear();

    match recommendations {
        Ok(Some(text)) => println!("\n{}", text),
        Ok(None) => println!("\n{} Could not generate recommendations.", "✗".red()),
        Err(e) => {
            tracing::warn!("Gemini recommendations failed: {}", e);
            println!("\n{} Could not generate recommendations.", "✗".red());
        }
    }

    Ok(())
}

fn not_found_json(package_id: &str) -> String {
    serde_json::json!({ "error": format!("App not found: {}", package_id) }).to_string()
}

async fn print_insights(enricher: &Enricher, app: &AppRecord) {
    let pb = spinner(format!("Asking Gemini about {}...", app.title_or_unknown()));
    let insights = enricher.app_insights(app).await;
    pb.finish_and_clear();

    match insights {
        Ok(Some(text)) => {
            println!("\n{} {}", "🤖".bold(), "Gemini AI Insights:".bold());
            println!("{}", text);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Gemini insights failed: {}", e),
    }
}

async fn print_safety(enricher: &Enricher, app: &AppRecord) {
    let pb = spinner("Analyzing safety...".to_string());
    let safety = enricher.analyze_safety(app).await;
    pb.finish_and_clear();

    match safety {
        Ok(Some(text)) => {
            println!("\n{} {}", "🔒".bold(), "Safety Analysis:".bold());
            println!("{}", text);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Gemini safety analysis failed: {}", e),
    }
}
