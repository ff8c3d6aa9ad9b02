//! Shared helpers for command implementations

use apk_hub::{AppFinder, AppRecord, Config, GoogleSearch, PlayStore};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 60;

pub(super) fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Spinner on a TTY, hidden otherwise
pub(super) fn spinner(message: String) -> ProgressBar {
    if !is_tty() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub(super) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub(super) fn section(title: &str) {
    println!("\n{}", rule().dimmed());
    println!("{}", title.bold());
    println!("{}", rule().dimmed());
}

pub(super) fn finder(config: &Config) -> anyhow::Result<AppFinder<PlayStore, GoogleSearch>> {
    Ok(AppFinder::new(
        PlayStore::new(config)?,
        GoogleSearch::new(config)?,
    ))
}

/// Warn (but carry on) when input doesn't look like `com.example.app`
pub(super) fn warn_if_not_package_id(package_id: &str) {
    if !apk_hub::playstore::looks_like_package_id(package_id) {
        println!(
            "{} '{}' doesn't look like a package ID (e.g. com.example.app)",
            "⚠".yellow(),
            package_id
        );
    }
}

pub(super) fn print_app_info(app: &AppRecord, index: Option<usize>, detailed: bool) {
    let prefix = index.map(|i| format!("{}. ", i)).unwrap_or_default();

    println!("\n{}{}", prefix, rule().dimmed());
    println!("{}", app.title_or_unknown().bold().green());
    println!("{}", rule().dimmed());
    println!("{}: {}", "Package ID".bold(), app.app_id.as_deref().unwrap_or("N/A"));
    println!("{}: {}", "Developer".bold(), app.developer.as_deref().unwrap_or("N/A"));

    let score = app
        .score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "N/A".to_string());

    if !detailed {
        let free = if app.is_free() { "Free" } else { "Paid" };
        println!("{}: {}/5.0 | {}", "Rating".bold(), score, free);
        return;
    }

    println!("{}: {}", "Version".bold(), app.version.as_deref().unwrap_or("N/A"));
    println!("{}: {}/5.0", "Rating".bold(), score);
    println!("{}: {}", "Installs".bold(), app.installs.as_deref().unwrap_or("N/A"));
    println!(
        "{}: {}",
        "Updated".bold(),
        app.updated_display().unwrap_or_else(|| "N/A".to_string())
    );
    println!(
        "{}: {}",
        "Android Version".bold(),
        app.android_version.as_deref().unwrap_or("N/A")
    );
    println!(
        "{}: {}",
        "Content Rating".bold(),
        app.content_rating.as_deref().unwrap_or("N/A")
    );
    if let Some(genre) = &app.genre {
        println!("{}: {}", "Genre".bold(), genre);
    }
    println!("{}: {}", "Free".bold(), if app.is_free() { "Yes" } else { "No" });
    println!("{}: {}", "Price".bold(), app.price_label());

    if let Some(desc) = app.short_description(200) {
        println!("\n{}: {}", "Description".bold(), desc);
    }

    if let Some(url) = &app.url {
        println!("\n{}: {}", "Play Store".bold(), url.cyan());
    }
}
