//! Console output.
//!
//! The live status stream (scan headers, open ports, notices) and the
//! final run summary in plain or JSON form.

use crate::runner::RunSummary;
use crate::types::PortRange;
use clap::ValueEnum;
use console::style;
use std::fmt;
use std::io::{self, Write};
use std::net::IpAddr;

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print the run summary in the requested format.
pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    write_summary(&mut stdout.lock(), summary, format)
}

/// Write the run summary in the requested format.
pub fn write_summary(
    out: &mut impl Write,
    summary: &RunSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain_summary(out, summary),
        OutputFormat::Json => write_json_summary(out, summary),
    }
}

fn write_plain_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Scan completed in {:.2} seconds",
        summary.elapsed_secs
    )?;
    writeln!(
        out,
        "Results saved to {}",
        summary.output_file.display()
    )?;

    if summary.targets_scanned > 0 || !summary.skipped.is_empty() {
        writeln!(
            out,
            "{} {} targets, {} ports: {} open, {} closed, {} timed out",
            style("•").dim(),
            summary.targets_scanned,
            summary.ports_probed,
            style(summary.open_ports).green().bold(),
            style(summary.closed_ports).red(),
            style(summary.timed_out_ports).yellow()
        )?;
    }
    if !summary.skipped.is_empty() {
        writeln!(
            out,
            "{} {} targets skipped",
            style("•").dim(),
            style(summary.skipped.len()).yellow()
        )?;
    }
    if summary.failed_probes > 0 {
        writeln!(
            out,
            "{} {} probes failed",
            style("•").dim(),
            style(summary.failed_probes).red()
        )?;
    }

    Ok(())
}

fn write_json_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

/// Print a scan header before a target is scanned.
pub fn print_scan_header(target: &str, ip: &IpAddr, ports: PortRange) {
    println!();
    println!(
        "{} Target: {} ({})",
        style("•").dim(),
        style(target).white().bold(),
        ip
    );
    println!(
        "{} Scanning {} ports ({})...",
        style("•").dim(),
        style(ports.len()).white().bold(),
        ports
    );
}

/// Mirror an open-port line on the status stream.
pub fn print_open_port(line: &str) {
    println!("{}", open_port_line(line));
}

/// An open-port line styled for the terminal.
pub fn open_port_line(line: &str) -> String {
    style(line).green().to_string()
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
