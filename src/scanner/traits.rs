//! Probe trait abstraction and the values flowing through a scan.
//!
//! Defines a common interface for probe implementations,
//! enabling polymorphism and easier testing.

use crate::types::{Port, Target};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Status of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// The handshake completed within the timeout.
    Open,
    /// The remote refused the connection, or connect failed outright.
    Closed,
    /// No answer arrived within the timeout.
    #[serde(rename = "timed_out")]
    TimedOut,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// One unit of work: a single connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTask {
    pub address: IpAddr,
    pub port: Port,
    pub timeout: Duration,
}

impl ScanTask {
    /// Create a new task.
    pub fn new(address: IpAddr, port: Port, timeout: Duration) -> Self {
        Self {
            address,
            port,
            timeout,
        }
    }

    /// The socket address to connect to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port.as_u16())
    }

    /// Pair this task with the status its probe produced.
    pub fn result(&self, status: PortStatus) -> ScanResult {
        match status {
            PortStatus::Open => ScanResult::Open {
                address: self.address,
                port: self.port,
            },
            PortStatus::Closed => ScanResult::Closed {
                address: self.address,
                port: self.port,
            },
            PortStatus::TimedOut => ScanResult::TimedOut {
                address: self.address,
                port: self.port,
            },
        }
    }
}

/// Outcome of one task, or of a target that never got that far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Open { address: IpAddr, port: Port },
    Closed { address: IpAddr, port: Port },
    TimedOut { address: IpAddr, port: Port },
    ResolutionFailed { target: Target, reason: String },
}

impl ScanResult {
    /// The port status, for results that carry one.
    pub fn status(&self) -> Option<PortStatus> {
        match self {
            Self::Open { .. } => Some(PortStatus::Open),
            Self::Closed { .. } => Some(PortStatus::Closed),
            Self::TimedOut { .. } => Some(PortStatus::TimedOut),
            Self::ResolutionFailed { .. } => None,
        }
    }

    /// The line persisted for an open port: `<address>:<port> - Open`.
    pub fn open_line(&self) -> Option<String> {
        match self {
            Self::Open { address, port } => Some(format!("{}:{} - Open", address, port)),
            _ => None,
        }
    }
}

/// Trait for single-connection probe implementations.
///
/// A probe never fails: every error is folded into a [`PortStatus`].
///
/// # Example
///
/// ```ignore
/// use portscout::scanner::{Prober, ScanTask, PortStatus};
///
/// async fn is_open<P: Prober>(prober: &P, task: ScanTask) -> bool {
///     prober.probe(task).await == PortStatus::Open
/// }
/// ```
#[async_trait]
pub trait Prober: Send + Sync {
    /// Attempt one connection and classify it.
    async fn probe(&self, task: ScanTask) -> PortStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn task(port: u16) -> ScanTask {
        ScanTask::new(
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
            Port::new(port).unwrap(),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_port_status_display() {
        assert_eq!(PortStatus::Open.to_string(), "open");
        assert_eq!(PortStatus::Closed.to_string(), "closed");
        assert_eq!(PortStatus::TimedOut.to_string(), "timed out");
    }

    #[test]
    fn test_open_line_format() {
        let result = task(443).result(PortStatus::Open);
        assert_eq!(result.status(), Some(PortStatus::Open));
        assert_eq!(result.open_line().as_deref(), Some("192.168.1.20:443 - Open"));
    }

    #[test]
    fn test_non_open_results_have_no_line() {
        assert_eq!(task(22).result(PortStatus::Closed).open_line(), None);
        assert_eq!(task(22).result(PortStatus::TimedOut).open_line(), None);

        let failed = ScanResult::ResolutionFailed {
            target: Target::new("nowhere.invalid"),
            reason: "no such host".to_string(),
        };
        assert_eq!(failed.open_line(), None);
        assert_eq!(failed.status(), None);
    }

    #[test]
    fn test_task_socket_addr() {
        assert_eq!(task(8080).socket_addr().to_string(), "192.168.1.20:8080");
    }
}
