mod colors;
mod commands;

use apk_hub::Config;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apk-hub")]
#[command(
    author,
    version,
    about = "Search Android apps and get download information with Google Search and Gemini AI",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for download-info files (overrides APK_HUB_DOWNLOAD_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    download_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for Android applications by name or package ID
    Search {
        /// App name, or package ID with --package-id
        query: String,

        /// Search by package ID instead of name
        #[arg(short, long)]
        package_id: bool,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,

        /// Add Gemini AI insights (requires --detailed)
        #[arg(short, long)]
        gemini: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write download information and mirror links for an app
    Download {
        /// Package ID (e.g. com.whatsapp)
        package_id: String,

        /// Specific version
        #[arg(short = 'V', long)]
        version: Option<String>,

        /// App name for the info file
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show detailed information about an app
    Info {
        /// Package ID (e.g. com.whatsapp)
        package_id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List files in the download directory
    Downloads,

    /// Find similar apps using Gemini AI
    Similar {
        /// App name
        app_name: String,

        /// Restrict suggestions to a category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    colors::init_colors();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load();
    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }

    let Some(command) = cli.command else {
        println!(
            "{} apk-hub: search Android apps and collect download info",
            "🚀".bold()
        );
        println!("\nRun {} to see available commands.", "apk-hub --help".cyan());
        return Ok(());
    };

    if !matches!(command, Commands::Completions { .. })
        && let Err(e) = config.ensure_download_dir()
    {
        tracing::warn!(
            "Could not create download directory {}: {}",
            config.download_dir.display(),
            e
        );
    }

    match command {
        Commands::Search {
            query,
            package_id,
            detailed,
            gemini,
            json,
        } => {
            let opts = commands::SearchOptions {
                by_package_id: package_id,
                detailed,
                gemini,
                json,
            };
            commands::search(&config, &query, opts).await?;
        }
        Commands::Download {
            package_id,
            version,
            name,
        } => {
            commands::download(&config, &package_id, version.as_deref(), name.as_deref()).await?;
        }
        Commands::Info { package_id, json } => {
            commands::info(&config, &package_id, json).await?;
        }
        Commands::Downloads => {
            commands::downloads(&config)?;
        }
        Commands::Similar { app_name, category } => {
            commands::similar(&config, &app_name, category.as_deref()).await?;
        }
        Commands::Completions { shell } => {
            commands::completions(shell);
        }
    }

    Ok(())
}
