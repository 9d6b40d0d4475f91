//! # portscout - A Concurrent TCP Connect Port Scanner
//!
//! portscout reads a list of targets and, one target at a time, attempts a
//! full TCP handshake on every port of a range with a bounded number of
//! connection attempts in flight. Open ports are appended to an output file
//! as `<ip>:<port> - Open`.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portscout::scanner::{Prober, ScanTask, TcpConnectProbe};
//! use portscout::types::Port;
//! use std::net::IpAddr;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target: IpAddr = "192.168.1.1".parse().unwrap();
//!     let task = ScanTask::new(target, Port::new(80).unwrap(), Duration::from_millis(500));
//!
//!     let status = TcpConnectProbe::new().probe(task).await;
//!     println!("{} is {}", task.socket_addr(), status);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports, port ranges, targets and address resolution
//! - [`scanner`] - The connect probe and the per-target scheduler
//! - [`sink`] - Serialized, append-only persistence of open ports
//! - [`runner`] - Sequential per-target orchestration and run summary
//! - [`config`] - Settings file and the immutable scan configuration
//! - [`error`] - Error types
//! - [`output`] - Console output

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod scanner;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{CliError, ConfigError, ScanError, SinkError, TargetError};
pub use runner::{RunSummary, ScanRunner};
pub use scanner::{scan_target, PortStatus, Prober, ScanResult, ScanTask};
pub use sink::ResultSink;
pub use types::{Port, PortRange, Target};
