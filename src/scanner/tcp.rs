//! TCP connect probe.
//!
//! Performs standard TCP connect attempts using the operating system's
//! socket API. The full handshake is completed and the connection dropped
//! immediately; no data is exchanged.

use crate::error::ScanError;
use crate::scanner::traits::{PortStatus, Prober, ScanTask};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect probe.
///
/// Does not require elevated privileges. The timeout bounds connection
/// establishment only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProbe;

impl TcpConnectProbe {
    /// Create a new TCP connect probe.
    pub fn new() -> Self {
        Self
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(addr: SocketAddr, limit: Duration) -> Result<TcpStream, ScanError> {
        match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify_io_error(addr, e)),
            Err(_) => Err(ScanError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProbe {
    async fn probe(&self, task: ScanTask) -> PortStatus {
        let addr = task.socket_addr();

        match Self::attempt_connect(addr, task.timeout).await {
            // Dropping the stream closes the socket.
            Ok(_stream) => PortStatus::Open,
            Err(e) => {
                trace!("{}: {}", addr, e);
                status_for_error(&e)
            }
        }
    }
}

fn classify_io_error(addr: SocketAddr, e: io::Error) -> ScanError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => ScanError::ConnectionRefused,
        io::ErrorKind::HostUnreachable => ScanError::HostUnreachable,
        io::ErrorKind::NetworkUnreachable => ScanError::NetworkUnreachable(e.to_string()),
        io::ErrorKind::TimedOut => ScanError::Timeout,
        _ => ScanError::ConnectionFailed {
            target: addr.ip().to_string(),
            port: addr.port(),
            reason: e.to_string(),
        },
    }
}

/// Map a connect failure to the status it reports.
///
/// Only a silent peer counts as timed out; anything the network answered
/// with, refusal or unreachability, is closed.
fn status_for_error(e: &ScanError) -> PortStatus {
    match e {
        ScanError::Timeout => PortStatus::TimedOut,
        ScanError::ConnectionRefused
        | ScanError::HostUnreachable
        | ScanError::NetworkUnreachable(_)
        | ScanError::ConnectionFailed { .. } => PortStatus::Closed,
    }
}
