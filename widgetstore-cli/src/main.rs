//! widgetstore CLI - run the widget tag query and print the result
//!
//! Thin caller around widgetstore-core: loads credentials, invokes the
//! query once, prints the widgets as JSON to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use widgetstore_core::{DbConfig, WidgetRepo};

#[derive(Parser, Debug)]
#[command(
    name = "widgetstore",
    author,
    version,
    about = "Query the widget catalog by tag"
)]
struct Cli {
    /// Path to a TOML config file with a [database] table.
    /// Falls back to WIDGETSTORE_DB_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List widgets carrying a tag, with their tag and dongle ids
    FindWidgets {
        /// Exact tag value to filter on
        #[arg(long)]
        tag: String,

        /// Number of widgets to skip
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Maximum number of widgets to return
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<DbConfig> {
    match path {
        Some(path) => DbConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => DbConfig::from_env()
            .context("no --config given and WIDGETSTORE_DB_* environment is incomplete"),
    }
}


#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; ignore a missing file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    debug!(?config, "loaded database config");

    match cli.command {
        Commands::FindWidgets { tag, offset, limit } => {
            let repo = WidgetRepo::new(config);
            let widgets = repo
                .find_widgets_with_tag(&tag, offset, limit)
                .await
                .context("widget query failed")?;

            println!("{}", serde_json::to_string_pretty(&widgets)?);
        }
    }

    Ok(())
}
