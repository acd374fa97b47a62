//! Vaultprep - Prep-Brief Compiler for Markdown Note Vaults
//!
//! Main entry point for the vaultprep CLI: compiles prep briefs and exposes
//! the underlying vault search, link traversal, and listing operations.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vaultprep::cli;
use vaultprep::error::Result;
use vaultprep::PrepConfig;

#[derive(Parser)]
#[command(name = "vaultprep", version, about = "Prep-brief compiler for markdown note vaults")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the note vault
    #[arg(long, default_value = ".", global = true)]
    vault: PathBuf,

    /// Vault name for deep links (defaults to the vault directory name)
    #[arg(long, global = true)]
    vault_name: Option<String>,

    /// Config file (defaults to vaultprep.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a prep brief for a free-text query
    Brief {
        /// Prep query (e.g. "meeting with Sarah")
        query: String,

        /// Graph traversal depth in hops
        #[arg(long)]
        depth: Option<usize>,

        /// Maximum candidate notes considered for ranking
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Write the brief to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search notes by title, content, and tags
    Search {
        /// Search query
        query: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List notes connected to a note via wikilinks and backlinks
    Links {
        /// Vault-relative note path
        note: PathBuf,

        /// How many hops to traverse
        #[arg(long, default_value = "2")]
        depth: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all notes in the vault
    List {
        /// Only notes carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only notes modified after this RFC 3339 timestamp
        #[arg(long)]
        modified_after: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show metadata for a single note
    Info {
        /// Vault-relative note path
        note: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::new(format!("vaultprep={}", cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("vaultprep v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = PrepConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Brief {
            query,
            depth,
            max_candidates,
            output,
        } => {
            if let Some(depth) = depth {
                config.traversal_depth = depth;
            }
            if let Some(max_candidates) = max_candidates {
                config.max_candidates = max_candidates;
            }
            cli::brief::run(&cli.vault, cli.vault_name, &query, &config, output.as_deref())
        }
        Commands::Search { query, json } => cli::search::run(&cli.vault, &query, json),
        Commands::Links { note, depth, json } => cli::links::run(&cli.vault, &note, depth, json),
        Commands::List {
            tag,
            modified_after,
            json,
        } => cli::list::run(&cli.vault, tag.as_deref(), modified_after.as_deref(), json),
        Commands::Info { note, json } => cli::info::run(&cli.vault, &note, json),
    }
}
