//! Command-line interface definitions for portscout.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::config::{AppSettings, ScanConfig};
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use crate::runner::{RunSummary, ScanRunner};
use crate::scanner::TcpConnectProbe;
use crate::sink::ResultSink;
use crate::types::{load_targets, DnsResolver};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::Arc;

/// Concurrent TCP connect scanner for a list of targets.
///
/// Every target in TARGET_FILE is scanned in turn; open ports are appended
/// to the output file as `<ip>:<port> - Open`.
#[derive(Parser, Debug)]
#[command(name = "portscout")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
pub struct Args {
    /// Text file containing target hostnames or IP addresses, one per line
    #[arg(value_name = "TARGET_FILE")]
    pub target_file: PathBuf,

    /// First port to scan [default: 1]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub start_port: Option<u16>,

    /// Last port to scan [default: 1024]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub end_port: Option<u16>,

    /// Number of concurrent connection attempts per target [default: 10]
    #[arg(short = 'n', long = "num-threads", visible_alias = "workers")]
    pub num_threads: Option<usize>,

    /// Timeout for each connection attempt, in seconds [default: 0.5]
    #[arg(short = 't', long)]
    pub timeout: Option<f64>,

    /// File that open ports are appended to [default: scan_results.txt]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Format of the final summary
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Show a progress bar while scanning each target
    #[arg(long)]
    pub progress: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and the final summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a JSON settings file
    #[arg(long, value_name = "PATH", env = "PORTSCOUT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Overlay the flags that were given on top of loaded settings.
    pub fn apply(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(port) = self.start_port {
            settings.start_port = port;
        }
        if let Some(port) = self.end_port {
            settings.end_port = port;
        }
        if let Some(workers) = self.num_threads {
            settings.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(ref path) = self.output_file {
            settings.output_file = path.clone();
        }
        settings
    }

    /// Whether the live status stream (target headers, open ports) goes to
    /// stdout. It never does when stdout carries the JSON summary.
    pub fn shows_status(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Plain
    }

    /// Whether the sink mirrors open ports itself. While a progress bar is
    /// drawn the scheduler prints them above the bar instead.
    pub fn echoes_open_ports(&self) -> bool {
        self.shows_status() && !self.progress
    }

    /// Run the scan described by these arguments and print its summary.
    pub async fn execute(&self) -> CliResult<()> {
        if let Some(summary) = self.scan().await? {
            output::print_summary(&summary, self.format)?;
        }
        Ok(())
    }

    /// Run the scan without printing the summary.
    ///
    /// Returns `None` when the target file names no targets.
    pub async fn scan(&self) -> CliResult<Option<RunSummary>> {
        let settings = self.apply(AppSettings::load(self.config.as_deref())?);
        let config = ScanConfig::from_settings(&settings)?;
        let config = if self.progress && !self.quiet {
            config.with_progress()
        } else {
            config
        };

        let targets = load_targets(&self.target_file)?;
        if targets.is_empty() {
            output::print_error("No targets specified.");
            return Ok(None);
        }

        let sink = Arc::new(ResultSink::open(
            config.output_file(),
            self.echoes_open_ports(),
        )?);
        let runner = ScanRunner::new(
            config,
            Arc::new(DnsResolver::new()),
            Arc::new(TcpConnectProbe::new()),
            sink,
        );
        let runner = if self.quiet {
            runner.quiet()
        } else if !self.shows_status() {
            runner.without_headers()
        } else {
            runner
        };

        Ok(Some(runner.run(&targets).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ConfigError, TargetError};
    use std::fs;
    use std::time::Duration;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let args = parse(&["portscout", "targets.txt"]);
        let settings = args.apply(AppSettings::default());
        assert_eq!(settings, AppSettings::default());
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(!args.quiet);
    }

    #[test]
    fn test_flags_override_settings() {
        let args = parse(&[
            "portscout",
            "targets.txt",
            "--start-port",
            "20",
            "--end-port",
            "25",
            "--num-threads",
            "3",
            "--timeout",
            "0.25",
            "--output-file",
            "found.txt",
        ]);
        let config = ScanConfig::from_settings(&args.apply(AppSettings::default())).unwrap();

        assert_eq!(config.ports().to_string(), "20-25");
        assert_eq!(config.workers(), 3);
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.output_file(), std::path::Path::new("found.txt"));
    }

    #[test]
    fn test_workers_alias() {
        let args = parse(&["portscout", "t.txt", "--workers", "42"]);
        assert_eq!(args.num_threads, Some(42));
    }

    #[test]
    fn test_port_zero_rejected() {
        assert!(Args::try_parse_from(["portscout", "t.txt", "--start-port", "0"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["portscout", "t.txt", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_status_stream_follows_format_and_flags() {
        assert!(parse(&["portscout", "t.txt"]).shows_status());
        assert!(parse(&["portscout", "t.txt"]).echoes_open_ports());

        let json = parse(&["portscout", "t.txt", "--format", "json"]);
        assert!(!json.shows_status());
        assert!(!json.echoes_open_ports());

        let quiet = parse(&["portscout", "t.txt", "-q"]);
        assert!(!quiet.shows_status());

        let progress = parse(&["portscout", "t.txt", "--progress"]);
        assert!(progress.shows_status());
        assert!(!progress.echoes_open_ports());
    }

    #[tokio::test]
    async fn test_json_run_summary_is_valid_json() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port().to_string();

        let dir = tempfile::tempdir().unwrap();
        let targets = dir.path().join("targets.txt");
        let out = dir.path().join("out.txt");
        fs::write(&targets, "127.0.0.1\n").unwrap();

        let args = parse(&[
            "portscout",
            targets.to_str().unwrap(),
            "--start-port",
            &port,
            "--end-port",
            &port,
            "-o",
            out.to_str().unwrap(),
            "--format",
            "json",
        ]);
        let summary = args.scan().await.unwrap().unwrap();

        let mut buf = Vec::new();
        output::write_summary(&mut buf, &summary, args.format).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["open_ports"], 1);
        assert_eq!(value["targets_scanned"], 1);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            format!("127.0.0.1:{} - Open\n", port)
        );
    }

    #[tokio::test]
    async fn test_empty_target_file_scans_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let targets = dir.path().join("targets.txt");
        let out = dir.path().join("out.txt");
        fs::write(&targets, "\n  \n").unwrap();

        let args = parse(&[
            "portscout",
            targets.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-q",
        ]);
        assert!(args.scan().await.unwrap().is_none());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_missing_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&[
            "portscout",
            dir.path().join("nope.txt").to_str().unwrap(),
        ]);
        assert!(matches!(
            args.execute().await,
            Err(CliError::Target(TargetError::ReadFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_timeout_fails_before_scanning() {
        let args = parse(&["portscout", "t.txt", "--timeout", "0"]);
        assert!(matches!(
            args.execute().await,
            Err(CliError::Config(ConfigError::InvalidTimeout(_)))
        ));
    }
}
