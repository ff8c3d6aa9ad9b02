//! Example: Search Google Play by app name or package ID
//!
//! This example demonstrates how to find apps with `AppFinder`, which falls
//! back to a site-restricted web search when the store's own search comes
//! back empty. With `GEMINI_API_KEY` set, the first hit also gets AI insights.
//!
//! Usage: cargo run --example search_apps [query] [--id]

use apk_hub::{AppFinder, Config, Enricher, GoogleSearch, PlayStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let query = if args.len() > 1 {
        args[1].clone()
    } else {
        "WhatsApp".to_string()
    };
    let by_package_id = args.iter().any(|a| a == "--id");

    let config = Config::load();
    let finder = AppFinder::new(PlayStore::new(&config)?, GoogleSearch::new(&config)?);

    println!(
        "Searching for '{}' ({})\n",
        query,
        if by_package_id { "package ID" } else { "app name" }
    );

    let results = finder.find_app(&query, by_package_id).await;
    if results.is_empty() {
        println!("No apps found matching '{}'", query);
        return Ok(());
    }

    println!("Found {} app(s):\n", results.len());
    for (i, app) in results.iter().enumerate() {
        println!("{}. {}", i + 1, app.title_or_unknown());
        println!("   Package:   {}", app.app_id.as_deref().unwrap_or("N/A"));
        println!("   Developer: {}", app.developer_or_unknown());
        if let Some(score) = app.score {
            println!("   Rating:    {:.1}", score);
        }
        println!("   Price:     {}", app.price_label());
    }

    let enricher = Enricher::from_config(&config);
    if enricher.is_available() {
        let first = &results[0];
        println!("\nGemini insights for {}:", first.title_or_unknown());
        match enricher.app_insights(first).await {
            Ok(Some(text)) => println!("{}", text),
            Ok(None) => println!("(no insights)"),
            Err(e) => eprintln!("Gemini error: {}", e),
        }
    } else {
        println!("\nSet GEMINI_API_KEY to see AI insights for the first result.");
    }

    Ok(())
}
