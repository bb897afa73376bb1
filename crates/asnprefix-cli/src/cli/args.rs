//! Command-line argument definitions using clap.

use crate::output::OutputFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Fetch the IP ranges announced by ASNs from multiple sources
///
/// Queries BGPView, RIPEstat and the bgp.tools table for every ASN, merges
/// and deduplicates the results, and writes them to <ASN>.txt, one prefix
/// per line.
#[derive(Parser, Debug)]
#[command(name = "asnprefix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// ASNs to resolve (e.g. AS62419, as62419 or 62419)
    #[arg(required = true, value_name = "ASN")]
    pub asns: Vec<String>,

    /// Destination folder for output TXT files [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, env = "ASNPREFIX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to cache the bgp.tools table [default: bgp_tools_cache.jsonl]
    #[arg(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Seconds before the cached bgp.tools table is refreshed [default: 86400]
    #[arg(long, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Number of ASNs resolved concurrently [default: 1]
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
