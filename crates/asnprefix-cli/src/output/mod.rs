//! Console rendering and the per-ASN result files.

use anyhow::{Context, Result};
use asnprefix::{AsnReport, Asn};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Available console output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Per-source trail followed by the combined list
    #[default]
    Pretty,
    /// One JSON report per line, status messages on stderr
    Json,
}

/// Make sure `dest` exists as a directory.
///
/// Returns `true` when the folder had to be created.
pub fn ensure_dest(dest: &Path) -> Result<bool> {
    if dest.is_dir() {
        return Ok(false);
    }

    std::fs::create_dir_all(dest).with_context(|| {
        format!("Error creating destination folder '{}'", dest.display())
    })?;
    Ok(true)
}

/// Path of the result file for `asn` inside `dest`.
pub fn output_path(dest: &Path, asn: &Asn) -> PathBuf {
    dest.join(asn.file_name())
}

/// File contents: one prefix per line, each newline-terminated.
pub fn render_prefixes(report: &AsnReport) -> String {
    report
        .prefixes
        .iter()
        .fold(String::new(), |mut out, prefix| {
            let _ = writeln!(out, "{prefix}");
            out
        })
}

/// Write the combined prefixes of `report` to `<dest>/<ASN>.txt`,
/// overwriting any previous file.
pub fn write_prefixes(dest: &Path, report: &AsnReport) -> std::io::Result<PathBuf> {
    let path = output_path(dest, &report.asn);
    std::fs::write(&path, render_prefixes(report))?;
    Ok(path)
}

/// Render one finished report in the chosen format.
pub fn format_report(report: &AsnReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{}\n{report}",
            format!("Processing {}...", report.asn).bold()
        )),
        OutputFormat::Json => {
            let json = serde_json::to_string(report)?;
            Ok(format!("{json}\n"))
        }
    }
}

/// Print a status line. In JSON mode it goes to stderr so stdout only
/// carries reports.
pub fn print_status(format: OutputFormat, msg: &str) {
    match format {
        OutputFormat::Pretty => println!("{msg}"),
        OutputFormat::Json => eprintln!("{msg}"),
    }
}

/// Print a success line.
pub fn print_success(format: OutputFormat, msg: &str) {
    print_status(format, &msg.green().to_string());
}

/// Print an error line as part of the per-ASN trail.
pub fn print_error(format: OutputFormat, msg: &str) {
    print_status(format, &msg.red().to_string());
}
