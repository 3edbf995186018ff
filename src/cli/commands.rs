//! CLI commands and argument parsing

use crate::types::{SortBy, SortOrder};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Catalog gateway CLI
#[derive(Parser, Debug)]
#[command(name = "catalog-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the upstream catalog base URL
    #[arg(long, global = true)]
    pub upstream_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server mode
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print an artist's songs
    Songs(ListArgs),

    /// Print an artist's albums
    Albums(ListArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments shared by the listing commands
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Upstream artist id
    pub artist_id: String,

    /// Sort criterion
    #[arg(long, value_enum, default_value_t = SortBy::Popularity)]
    pub sort_by: SortBy,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    pub sort_order: SortOrder,

    /// Fetch a single upstream page instead of the full listing
    #[arg(long)]
    pub page: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
