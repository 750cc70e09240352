//! Command-line arguments

use clap::{Parser, Subcommand};
use genius_client::{DEFAULT_SEARCH_PER_PAGE, EXPORT_SEARCH_PER_PAGE};

/// Look up artists on Genius
#[derive(Debug, Parser)]
#[command(name = "genius-cli", version, about)]
pub struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve artist names and print one row per name
    Table {
        /// Artist names, resolved in the order given
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Run a single search and list the hits
    Search {
        /// Free-text query
        term: String,

        /// Number of hits to request
        #[arg(long, default_value_t = DEFAULT_SEARCH_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..=50))]
        per_page: u32,
    },

    /// Look up an artist by Genius ID
    Artist {
        /// Genius artist ID
        id: u64,
    },

    /// Flatten search hits for one or more terms into a tab-separated table
    Export {
        /// Search terms, exported in the order given
        #[arg(required = true)]
        terms: Vec<String>,

        /// Number of hits to request per term
        #[arg(long, default_value_t = EXPORT_SEARCH_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..=50))]
        per_page: u32,

        /// Only list distinct primary artists
        #[arg(long)]
        distinct: bool,
    },
}
