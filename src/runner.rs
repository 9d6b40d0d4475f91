//! Run orchestration.
//!
//! Targets are handled strictly one after another: resolve, then scan every
//! port, then move on. A target that does not resolve is skipped.

use crate::config::ScanConfig;
use crate::error::SinkResult;
use crate::output;
use crate::scanner::{scan_target, ScanResult, SharedProber, TargetReport};
use crate::sink::ResultSink;
use crate::types::{Resolver, Target};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A target that was not scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTarget {
    pub target: Target,
    pub reason: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub elapsed_secs: f64,
    pub output_file: PathBuf,
    pub targets_scanned: usize,
    pub ports_probed: usize,
    pub open_ports: usize,
    pub closed_ports: usize,
    pub timed_out_ports: usize,
    pub failed_probes: usize,
    pub skipped: Vec<SkippedTarget>,
    pub targets: Vec<TargetReport>,
}

impl RunSummary {
    fn new(output_file: PathBuf) -> Self {
        Self {
            elapsed_secs: 0.0,
            output_file,
            targets_scanned: 0,
            ports_probed: 0,
            open_ports: 0,
            closed_ports: 0,
            timed_out_ports: 0,
            failed_probes: 0,
            skipped: Vec::new(),
            targets: Vec::new(),
        }
    }

    fn add(&mut self, report: TargetReport) {
        self.targets_scanned += 1;
        self.ports_probed += report.ports_probed;
        self.open_ports += report.open;
        self.closed_ports += report.closed;
        self.timed_out_ports += report.timed_out;
        self.failed_probes += report.failed;
        self.targets.push(report);
    }
}

/// Drives a scan over a list of targets.
pub struct ScanRunner {
    config: ScanConfig,
    resolver: Arc<dyn Resolver>,
    prober: SharedProber,
    sink: Arc<ResultSink>,
    headers: bool,
    notices: bool,
}

impl ScanRunner {
    /// Create a runner from its collaborators.
    pub fn new(
        config: ScanConfig,
        resolver: Arc<dyn Resolver>,
        prober: SharedProber,
        sink: Arc<ResultSink>,
    ) -> Self {
        Self {
            config,
            resolver,
            prober,
            sink,
            headers: true,
            notices: true,
        }
    }

    /// Suppress per-target headers and skip notices on the console.
    pub fn quiet(mut self) -> Self {
        self.headers = false;
        self.notices = false;
        self
    }

    /// Suppress per-target headers on stdout, keeping skip notices on stderr.
    ///
    /// Used when stdout carries machine-readable output.
    pub fn without_headers(mut self) -> Self {
        self.headers = false;
        self
    }

    /// Scan every target in order.
    ///
    /// Fails only when the output file can no longer be written.
    pub async fn run(&self, targets: &[Target]) -> SinkResult<RunSummary> {
        let mut summary = RunSummary::new(self.sink.path().to_path_buf());
        let start_time = Instant::now();

        for target in targets {
            let address = match self.resolver.resolve(target).await {
                Ok(address) => address,
                Err(e) => {
                    let skipped = ScanResult::ResolutionFailed {
                        target: target.clone(),
                        reason: e.to_string(),
                    };
                    self.sink.record(&skipped)?;

                    warn!("skipping {}: {}", target, e);
                    if self.notices {
                        output::print_warning(&format!("Invalid hostname: {}", target));
                    }
                    summary.skipped.push(SkippedTarget {
                        target: target.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if self.headers {
                output::print_scan_header(target.as_str(), &address, self.config.ports());
            }

            let report = scan_target(
                address,
                &self.config,
                Arc::clone(&self.prober),
                Arc::clone(&self.sink),
            )
            .await?;
            summary.add(report);
        }

        summary.elapsed_secs = start_time.elapsed().as_secs_f64();
        info!(
            "scanned {} targets ({} skipped) in {:.2}s",
            summary.targets_scanned,
            summary.skipped.len(),
            summary.elapsed_secs
        );
        Ok(summary)
    }
}
