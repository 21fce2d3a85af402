//! CLI definition using clap

use clap::{Parser, Subcommand};
use loadboard_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loadboard")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Mock freight load board: search and ingestion services")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// SQLite database file (overrides config and DATABASE_URL)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Port to listen on. Uses config value if not specified.
        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// Address to bind. Uses config value if not specified.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Search available postings
    Search {
        /// Origin substring (case-insensitive)
        #[arg(long)]
        origin: Option<String>,

        /// Destination substring (case-insensitive)
        #[arg(long)]
        destination: Option<String>,

        /// Equipment type (exact match, e.g. "Van", "Reefer")
        #[arg(long, short = 'e')]
        equipment: Option<String>,

        /// Posting status
        #[arg(long, default_value = "available")]
        status: String,

        /// Maximum number of postings. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<u32>,
    },

    /// Post a single load
    Post {
        #[arg(long)]
        origin: String,

        #[arg(long)]
        destination: String,

        /// Distance in miles
        #[arg(long)]
        distance: String,

        /// Rate in USD
        #[arg(long)]
        rate: String,

        /// Equipment type (default: Van)
        #[arg(long, short = 'e')]
        equipment: Option<String>,

        /// Broker name (default: Unknown)
        #[arg(long)]
        broker: Option<String>,

        #[arg(long)]
        broker_email: Option<String>,

        /// Pickup date (YYYY-MM-DD)
        #[arg(long)]
        pickup_date: Option<String>,

        #[arg(long)]
        commodity: Option<String>,
    },

    /// Bulk import postings from a CSV file
    Import {
        /// CSV with a header row (origin,destination,distance,rate,...)
        file: PathBuf,

        /// Validate rows without inserting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the load board with summary figures
    Board {
        /// Quick filter on origin, destination or broker
        #[arg(long, short = 'q')]
        filter: Option<String>,

        /// Maximum number of postings fetched. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<u32>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set database file
        #[arg(long)]
        set_database: Option<PathBuf>,

        /// Set HTTP port
        #[arg(long)]
        set_port: Option<u16>,

        /// Set bind address
        #[arg(long)]
        set_bind: Option<String>,

        /// Set default search limit
        #[arg(long)]
        set_limit: Option<u32>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
