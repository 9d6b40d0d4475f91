//! Scanner module - schedules probes for one target at a time.
//!
//! For a target, one probe is dispatched per port of the configured range
//! with at most `workers` of them in flight, and the call only returns once
//! every one of them has finished.

pub mod tcp;
pub mod traits;

use crate::config::ScanConfig;
use crate::error::SinkResult;
use crate::output;
use crate::sink::ResultSink;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use tcp::TcpConnectProbe;
pub use traits::{PortStatus, Prober, ScanResult, ScanTask};

/// A probe shared by every worker of a scan.
pub type SharedProber = Arc<dyn Prober>;

/// Per-target tally of probe outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub address: IpAddr,
    pub ports_probed: usize,
    pub open: usize,
    pub closed: usize,
    pub timed_out: usize,
    /// Probe tasks that died before producing a status.
    pub failed: usize,
    pub duration_ms: u64,
}

impl TargetReport {
    fn new(address: IpAddr) -> Self {
        Self {
            address,
            ports_probed: 0,
            open: 0,
            closed: 0,
            timed_out: 0,
            failed: 0,
            duration_ms: 0,
        }
    }

    fn tally(&mut self, status: PortStatus) {
        self.ports_probed += 1;
        match status {
            PortStatus::Open => self.open += 1,
            PortStatus::Closed => self.closed += 1,
            PortStatus::TimedOut => self.timed_out += 1,
        }
    }

    /// Ports that finished, with or without a status.
    pub fn completed(&self) -> usize {
        self.ports_probed + self.failed
    }
}

/// Probe every port of the configured range on one address.
///
/// Open ports are recorded in `sink` as they are found. The first output
/// error seen by any worker is returned once all probes have finished.
pub async fn scan_target(
    address: IpAddr,
    config: &ScanConfig,
    prober: SharedProber,
    sink: Arc<ResultSink>,
) -> SinkResult<TargetReport> {
    let start_time = Instant::now();
    let ports = config.ports();
    let timeout = config.timeout();
    let progress = config.progress().then(|| progress_bar(ports.len()));

    info!(
        "scanning {} ports on {} with {} workers",
        ports.len(),
        address,
        config.workers()
    );

    // Tasks are spawned lazily as the buffer drains, so no more than
    // `workers` of them exist at once.
    let mut outcomes = stream::iter(ports.iter())
        .map(|port| {
            let prober = Arc::clone(&prober);
            let sink = Arc::clone(&sink);
            let task = ScanTask::new(address, port, timeout);

            tokio::spawn(async move {
                let status = prober.probe(task).await;
                debug!("{} is {}", task.socket_addr(), status);
                let result = task.result(status);
                let recorded = sink.record_async(result.clone()).await;
                (result, recorded)
            })
        })
        .buffer_unordered(config.workers());

    let mut report = TargetReport::new(address);
    let mut first_error = None;

    while let Some(joined) = outcomes.next().await {
        match joined {
            Ok((result, recorded)) => {
                if let Some(status) = result.status() {
                    report.tally(status);
                }
                if let Err(e) = recorded {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                // The bar owns the terminal while it is drawn; open ports are
                // printed above it instead of through the sink's echo.
                if let (Some(pb), Some(line)) = (progress.as_ref(), result.open_line()) {
                    pb.println(output::open_port_line(&line));
                    pb.set_message(format!("found open port on {}", address));
                }
            }
            Err(e) => {
                warn!("probe task on {} failed: {}", address, e);
                report.failed += 1;
            }
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    report.duration_ms = duration_ms(start_time.elapsed());

    if let Some(e) = first_error {
        return Err(e);
    }

    info!(
        "{}: {} open, {} closed, {} timed out in {}ms",
        address, report.open, report.closed, report.timed_out, report.duration_ms
    );
    Ok(report)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    )
    .map(|s| s.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
