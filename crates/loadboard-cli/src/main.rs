//! Load Board - mock freight load board
//!
//! Serves the search and ingestion API, and drives the same services from the
//! command line.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    commands::init_tracing(&cli);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
