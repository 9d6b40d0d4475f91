//! Error types for portscout.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while attempting a single connection.
///
/// These never leave the probe: every variant is folded into a port status.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Connection timed out")]
    Timeout,

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Host unreachable")]
    HostUnreachable,

    #[error("Connection failed to {target}:{port}: {reason}")]
    ConnectionFailed {
        target: String,
        port: u16,
        reason: String,
    },
}

/// Errors related to targets: loading the target list and resolving names.
#[derive(Error, Debug, Clone)]
pub enum TargetError {
    #[error("failed to read target file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),

    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),

    #[error("invalid target: '{0}'")]
    InvalidFormat(String),
}

/// Errors raised by the result sink while persisting open ports.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to open output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output writer lock poisoned")]
    Poisoned,

    #[error("output writer task failed: {0}")]
    WriterTask(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid config format: {0}")]
    InvalidFormat(String),

    #[error("worker count must be at least 1")]
    InvalidWorkers,

    #[error("timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("port {0} is out of valid range (1-65535)")]
    InvalidPort(u16),
}

/// Top-level error type for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for target operations.
pub type TargetResult<T> = Result<T, TargetError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
