//! Tagmark CLI - Manage bookmarks and tag them with an LLM.

use clap::Parser;
use std::fs;
use tagmark_cli::commands;
use tagmark_cli::{Cli, Command, Config, Formatter};
use tagmark_store::SqliteStore;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> tagmark_cli::Result<String> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.settings.database_path.clone());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut store = SqliteStore::new(&db_path)?;
    tracing::debug!("Opened bookmark store at {}", db_path.display());

    match cli.command {
        Command::Add(args) => commands::execute_add(args, &mut store, &formatter),
        Command::List(args) => commands::execute_list(args, &store, &formatter),
        Command::Get(args) => commands::execute_get(args, &store, &formatter),
        Command::Update(args) => commands::execute_update(args, &mut store, &formatter),
        Command::Delete(args) => commands::execute_delete(args, &mut store, &formatter),
        Command::Expired(args) => commands::execute_expired(args, &store, &formatter),
        Command::Classify(args) => {
            let inputs = commands::collect_inputs(&args)?;
            let mut classifier = commands::classify::chat_classifier(&config, args.api_key, store)?;
            commands::execute_classify(&inputs, &mut classifier, &formatter)
        }
    }
}
