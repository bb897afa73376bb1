//! CLI argument parsing and the resolve-and-write loop.

pub mod args;
mod logging;

use anyhow::{Context, Result};
use args::Cli;
use asnprefix::{Asn, BulkTableCache, PrefixAggregator, PrefixClient};
use clap::Parser;
use colored::Colorize;
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{Config, Settings};
use crate::output::{self, print_error, print_success, OutputFormat};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, !cli.no_color);

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let settings = Settings::resolve(&cli, config);
    debug!(?settings, "effective settings");

    // The destination must exist before anything is fetched
    let format = settings.output_format;
    if output::ensure_dest(&settings.dest)? {
        output::print_status(
            format,
            &format!(
                "Created destination folder: {}",
                settings.dest.display().to_string().cyan()
            ),
        );
    }

    let client = PrefixClient::builder()
        .endpoints(settings.endpoints.clone())
        .build()
        .context("Error creating HTTP client")?;
    let cache = Arc::new(BulkTableCache::from_config(
        client.bulk_table(),
        &settings.cache,
    ));
    let aggregator = PrefixAggregator::standard(&client, cache).jobs(settings.jobs);

    let asns: Vec<Asn> = cli.asns.iter().map(|raw| Asn::normalize(raw)).collect();
    let mut reports = std::pin::pin!(aggregator.stream(&asns));

    while let Some(report) = reports.next().await {
        print!("{}", output::format_report(&report, format)?);

        match output::write_prefixes(&settings.dest, &report) {
            Ok(path) => print_success(format, &format!("Output written to {}", path.display())),
            Err(e) => {
                warn!(asn = %report.asn, error = %e, "failed to write output file");
                print_error(format, &format!("Error writing {} to file: {e}", report.asn));
            }
        }
        if format == OutputFormat::Pretty {
            println!();
        }
    }

    Ok(())
}
