//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tagmark CLI - Manage bookmarks and tag them with an LLM.
#[derive(Debug, Parser)]
#[command(name = "tagmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Configuration file path (default: ~/.tagmark/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path, overrides the configuration file
    #[arg(long, global = true, env = "TAGMARK_DB")]
    pub db: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a bookmark
    Add(AddArgs),

    /// List bookmarks
    List(ListArgs),

    /// Show one bookmark
    Get(IdArgs),

    /// Replace every field of a bookmark
    Update(UpdateArgs),

    /// Delete a bookmark
    Delete(IdArgs),

    /// List bookmarks whose expiration date has passed
    Expired(ListArgs),

    /// Tag bookmarks with the classification service and store the result
    Classify(ClassifyArgs),
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Bookmark title
    pub title: String,

    /// Bookmark URL (must be unique)
    pub url: String,

    /// Tags, separated by ", "
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Expiration date as Unix seconds
    #[arg(short, long)]
    pub expires_at: Option<u64>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Number of bookmarks to skip
    #[arg(long, default_value = "0")]
    pub skip: usize,

    /// Maximum number of results
    #[arg(short, long, default_value = "100")]
    pub limit: usize,
}

/// Arguments for commands addressing one bookmark.
#[derive(Debug, Parser)]
pub struct IdArgs {
    /// Bookmark id
    pub id: i64,
}

/// Arguments for the update command.
#[derive(Debug, Parser)]
pub struct UpdateArgs {
    /// Bookmark id
    pub id: i64,

    /// New title
    pub title: String,

    /// New URL
    pub url: String,

    /// New tags, separated by ", " (omit to clear)
    #[arg(short, long)]
    pub tags: Option<String>,

    /// New expiration date as Unix seconds (omit to clear)
    #[arg(short, long)]
    pub expires_at: Option<u64>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// A bookmark to classify (repeatable)
    #[arg(short, long = "item", num_args = 2, value_names = ["TITLE", "URL"])]
    pub items: Vec<String>,

    /// JSON file with an array of {"title", "url"} objects
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Classification service API key
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify_items() {
        let cli = Cli::parse_from([
            "tagmark",
            "classify",
            "--item",
            "Go Docs",
            "https://go.dev",
            "--item",
            "Rust",
            "https://www.rust-lang.org",
        ]);

        match cli.command {
            Command::Classify(args) => {
                assert_eq!(
                    args.items,
                    vec!["Go Docs", "https://go.dev", "Rust", "https://www.rust-lang.org"]
                );
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_with_options() {
        let cli = Cli::parse_from([
            "tagmark",
            "--format",
            "json",
            "add",
            "Go Docs",
            "https://go.dev",
            "--tags",
            "programming, go",
            "--expires-at",
            "1900000000",
        ]);

        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.title, "Go Docs");
                assert_eq!(args.tags.as_deref(), Some("programming, go"));
                assert_eq!(args.expires_at, Some(1_900_000_000));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }
}
