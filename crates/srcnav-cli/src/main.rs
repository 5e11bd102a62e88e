//! srcnav-cli: command-line front for the srcnav symbol indexer.

mod commands_config;
mod commands_index;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "srcnav",
    about = "Extract symbols and references for code navigation"
)]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index resolved units into symbol, reference and package tables
    Index {
        /// Unit documents to index (defaults to every unit under --root)
        inputs: Vec<PathBuf>,

        /// Project root (defaults to current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Manifest listing the home package and its dependencies
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to <root>/srcnav.toml, then ~/.srcnav/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Read or modify configuration.
    ///
    /// Edits ~/.srcnav/config.toml unless --config is given. `index` reads a
    /// project's <root>/srcnav.toml first, so pass that path to change it.
    Config {
        /// Configuration file to read or edit
        #[arg(short, long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a value by dot-separated key (e.g. classifier.package_scheme)
    Get {
        key: String,
    },
    /// Set a value by dot-separated key
    Set {
        key: String,
        /// New value; parsed as JSON, falling back to a plain string
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the tables.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("srcnav=info".parse().expect("valid tracing directive")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            inputs,
            root,
            manifest,
            output,
            config,
            pretty,
        } => {
            let root = match root {
                Some(p) => p,
                None => std::env::current_dir()?,
            };
            commands_index::cmd_index(&commands_index::IndexArgs {
                root: &root,
                inputs: &inputs,
                manifest: manifest.as_deref(),
                output: output.as_deref(),
                config: config.as_deref(),
                pretty,
            })?;
        }
        Commands::Config { config, action } => match action {
            ConfigAction::Get { key } => commands_config::cmd_config_get(config.as_deref(), &key)?,
            ConfigAction::Set { key, value } => {
                commands_config::cmd_config_set(config.as_deref(), &key, &value)?
            }
        },
    }

    Ok(())
}
