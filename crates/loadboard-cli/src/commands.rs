//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_board, output_posting, output_postings};
use indicatif::{ProgressBar, ProgressStyle};
use loadboard_app::app::{ingest_posting, load_board, search_postings};
use loadboard_app::config::Config;
use loadboard_app::import::{import_postings, load_ingest_requests};
use loadboard_app::repository::open_posting_store;
use loadboard_domain::model::IngestRequest;
use loadboard_domain::service::SearchFilter;
use loadboard_types::{OutputFormat, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. `RUST_LOG` wins over the defaults.
pub fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Serve { port, bind } => {
            let mut config = effective_config(&cli)?;
            if let Some(port) = port {
                config.port = *port;
            }
            if let Some(bind) = bind {
                config.bind_address = bind.clone();
            }
            cmd_serve(config)
        }

        Commands::Search {
            origin,
            destination,
            equipment,
            status,
            limit,
        } => {
            let config = effective_config(&cli)?;
            let filter = SearchFilter::default()
                .with_origin(origin.clone())
                .with_destination(destination.clone())
                .with_equipment(equipment.clone())
                .with_status(Some(status.clone()))
                .with_limit(limit.unwrap_or(config.default_search_limit));
            cmd_search(&config, &filter, cli.format.unwrap_or(config.output_format))
        }

        Commands::Post {
            origin,
            destination,
            distance,
            rate,
            equipment,
            broker,
            broker_email,
            pickup_date,
            commodity,
        } => {
            let config = effective_config(&cli)?;
            let request = IngestRequest {
                equipment: equipment.clone(),
                broker: broker.clone(),
                broker_email: broker_email.clone(),
                pickup_date: pickup_date.clone(),
                commodity: commodity.clone(),
                ..IngestRequest::new(origin.as_str(), destination.as_str(), distance.as_str(), rate.as_str())
            };
            cmd_post(&config, &request, cli.format.unwrap_or(config.output_format))
        }

        Commands::Import { file, dry_run } => {
            let config = effective_config(&cli)?;
            cmd_import(&config, file.clone(), *dry_run, cli.verbose)
        }

        Commands::Board { filter, limit } => {
            let config = effective_config(&cli)?;
            cmd_board(
                &config,
                filter.as_deref().unwrap_or_default(),
                limit.unwrap_or(config.default_search_limit),
                cli.format.unwrap_or(config.output_format),
            )
        }

        // Operates on the config file itself, without env or CLI overrides
        Commands::Config {
            show,
            set_database,
            set_port,
            set_bind,
            set_limit,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_database.clone(),
            *set_port,
            set_bind.clone(),
            *set_limit,
            *set_output,
            *reset,
        ),
    }
}

/// Config file, then environment, then `--database`
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(ref database) = cli.database {
        config.database_path = Some(database.clone());
    }
    Ok(config)
}

fn cmd_serve(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(loadboard_server::start_server(config))
}

fn cmd_search(config: &Config, filter: &SearchFilter, output_format: OutputFormat) -> Result<()> {
    let store = open_posting_store(config)?;
    let postings = search_postings(&store, filter)?;
    output_postings(output_format, &postings)
}

fn cmd_post(config: &Config, request: &IngestRequest, output_format: OutputFormat) -> Result<()> {
    let store = open_posting_store(config)?;
    let record = ingest_posting(&store, request)?;
    output_posting(output_format, &record)
}

fn cmd_board(config: &Config, filter: &str, limit: u32, output_format: OutputFormat) -> Result<()> {
    let store = open_posting_store(config)?;
    let view = load_board(&store, filter, limit)?;
    output_board(output_format, &view, filter)
}

fn cmd_import(config: &Config, file: PathBuf, dry_run: bool, verbose: bool) -> Result<()> {
    println!("Reading postings from: {}", file.display());

    let rows = load_ingest_requests(&file)?;
    if rows.is_empty() {
        println!("No rows to import.");
        return Ok(());
    }

    let store = open_posting_store(config)?;

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let report = import_postings(&store, rows, dry_run, |line, reason| {
        pb.set_message(format!("line {}", line));
        if let (true, Some(reason)) = (verbose, reason) {
            pb.println(format!("  Line {}: {}", line, reason));
        }
        pb.inc(1);
    });
    pb.finish_with_message("done");
    let report = report?;

    println!();
    if dry_run {
        println!("Dry run: {} valid, {} rejected", report.imported, report.rejected.len());
    } else {
        println!("Imported: {}, rejected: {}", report.imported, report.rejected.len());
    }

    if !report.rejected.is_empty() && !verbose {
        println!("\nRejected rows:");
        for (line, reason) in &report.rejected {
            println!("  Line {}: {}", line, reason);
        }
    }

    Ok(())
}

fn cmd_config(
    show: bool,
    set_database: Option<PathBuf>,
    set_port: Option<u16>,
    set_bind: Option<String>,
    set_limit: Option<u32>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    let path = Config::config_path()?;

    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;
    let mut modified = false;

    if let Some(database) = set_database {
        config.database_path = Some(database);
        modified = true;
    }

    if let Some(port) = set_port {
        config.port = port;
        modified = true;
    }

    if let Some(bind) = set_bind {
        config.bind_address = bind;
        modified = true;
    }

    if let Some(limit) = set_limit {
        config.default_search_limit = limit;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
