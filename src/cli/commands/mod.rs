//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `resolve`: permalink resolution, degrading to free-text search
//! - `search`: aggregate search
//! - `platforms`: configured platform listing
//! - `uid`: public identifier encoding

mod platforms;
mod resolve;
mod search;
mod uid;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config;
use crate::engine::Engine;
use crate::platform::{Mode, SearchKind};

pub use platforms::cmd_platforms;
pub use resolve::cmd_resolve;
pub use search::cmd_search;
pub use uid::cmd_uid;

/// Resolve music links and search streaming platforms
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(short, long, global = true, env = "TUNELINK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a platform link; unknown links fall back to a search
    Resolve {
        /// Track, album or artist URL
        url: String,
        /// Spend extra lookups completing partial results
        #[arg(long)]
        eager: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search several platforms at once
    Search {
        /// Free-text query
        query: String,
        /// What to search for (track or album)
        #[arg(short = 't', long = "type", default_value = "track")]
        kind: SearchKind,
        /// Comma-separated platform tags (default: the default platforms)
        #[arg(short, long, value_delimiter = ',')]
        platforms: Vec<String>,
        /// Maximum number of results (0 = configured maximum)
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Spend extra lookups completing partial results
        #[arg(long)]
        eager: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List configured platforms
    Platforms {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Encode or decode public identifiers
    Uid {
        #[command(subcommand)]
        command: UidCommand,
    },
}

#[derive(Subcommand)]
pub enum UidCommand {
    /// Numeric id to UID
    Encode { id: u64 },
    /// UID to numeric id
    Decode { uid: String },
}

/// Run the parsed command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Resolve { url, eager, json } => {
            let rt = Runtime::new()?;
            let engine = load_engine(cli)?;
            cmd_resolve(&rt, &engine, url, mode(*eager), *json)
        }
        Commands::Search {
            query,
            kind,
            platforms,
            limit,
            eager,
            json,
        } => {
            let rt = Runtime::new()?;
            let engine = load_engine(cli)?;
            cmd_search(&rt, &engine, *kind, query, platforms, *limit, mode(*eager), *json)
        }
        Commands::Platforms { json } => {
            let engine = load_engine(cli)?;
            cmd_platforms(&engine, *json)
        }
        Commands::Uid { command } => cmd_uid(command),
    }
}

fn load_engine(cli: &Cli) -> anyhow::Result<Engine> {
    let config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    Engine::from_config(&config).context("Invalid platform configuration")
}

fn mode(eager: bool) -> Mode {
    if eager { Mode::Eager } else { Mode::Lazy }
}
