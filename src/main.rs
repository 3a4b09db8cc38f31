//! Emojikit CLI - manual access to the local emoji catalog

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use emojikit::output::OutputMode;
use emojikit::query::DEFAULT_LIMIT;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "emojikit")]
#[command(version)]
#[command(about = "Local emoji catalog - search, categories, favorites and history")]
#[command(long_about = r#"
Emojikit keeps a local SQLite catalog of emoji metadata, enabling:
  • Keyword and name search, filtered by category
  • Favorites and recently used emojis
  • Copying glyphs to the clipboard

Example usage:
  emojikit import ./emoji.json
  emojikit search --query cat --category "Animals & Nature"
  emojikit use 42
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search emojis by name/keyword and category
    Search {
        /// Substring of the short name or a keyword
        #[arg(short, long)]
        query: Option<String>,

        /// Exact group name
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Number of results to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// List emoji categories
    Categories,

    /// List subgroups of a category
    Subgroups {
        category: String,
    },

    /// List favorite emojis
    Favorites {
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// List recently used emojis
    Recent {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show a single emoji
    Info {
        id: i64,
    },

    /// Add an emoji to favorites
    Favorite {
        id: i64,
    },

    /// Remove an emoji from favorites
    Unfavorite {
        id: i64,
    },

    /// Flip the favorite state of an emoji
    Toggle {
        id: i64,
    },

    /// Record usage of an emoji and copy it to the clipboard
    Use {
        id: i64,
    },

    /// Copy text to the clipboard
    Copy {
        text: String,
    },

    /// Print the clipboard contents
    Paste,

    /// (Re)build the catalog from a JSON dataset
    Import {
        dataset: PathBuf,
    },

    /// Show statistics about the catalog
    Stats,

    /// Write a config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output = OutputMode::from_json_flag(cli.json);
    let config = emojikit::config::load_config(cli.config.as_deref())?;
    let ctx = commands::Context {
        output,
        database: cli.database,
        config,
        config_path: cli.config,
    };

    let result = match cli.command {
        Commands::Search { query, category, limit, offset } => {
            commands::run_search(&ctx, query, category, limit, offset)
        }
        Commands::Categories => commands::run_categories(&ctx),
        Commands::Subgroups { category } => commands::run_subgroups(&ctx, &category),
        Commands::Favorites { limit, offset } => commands::run_favorites(&ctx, limit, offset),
        Commands::Recent { limit } => commands::run_recent(&ctx, limit),
        Commands::Info { id } => commands::run_info(&ctx, id),
        Commands::Favorite { id } => commands::run_favorite(&ctx, id, true),
        Commands::Unfavorite { id } => commands::run_favorite(&ctx, id, false),
        Commands::Toggle { id } => commands::run_toggle(&ctx, id),
        Commands::Use { id } => commands::run_use(&ctx, id),
        Commands::Copy { text } => commands::run_copy(&ctx, &text),
        Commands::Paste => commands::run_paste(&ctx),
        Commands::Import { dataset } => commands::run_import(&ctx, &dataset),
        Commands::Stats => commands::run_stats(&ctx),
        Commands::Init { force } => commands::run_init(&ctx, force),
    };

    if let Err(err) = result {
        emojikit::ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}
