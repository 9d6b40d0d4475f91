//! The immutable configuration shared by every worker of a run.

use super::settings::AppSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::types::PortRange;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a scan run.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    workers: usize,
    timeout: Duration,
    ports: PortRange,
    output_file: PathBuf,
    progress: bool,
}

impl ScanConfig {
    /// Create a scan configuration, validating worker count and timeout.
    pub fn new(
        workers: usize,
        timeout: Duration,
        ports: PortRange,
        output_file: impl Into<PathBuf>,
    ) -> ConfigResult<Self> {
        if workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(0.0));
        }

        Ok(Self {
            workers,
            timeout,
            ports,
            output_file: output_file.into(),
            progress: false,
        })
    }

    /// Build a configuration from merged settings.
    pub fn from_settings(settings: &AppSettings) -> ConfigResult<Self> {
        let timeout = Duration::try_from_secs_f64(settings.timeout_secs)
            .map_err(|_| ConfigError::InvalidTimeout(settings.timeout_secs))?;
        let ports = PortRange::from_bounds(settings.start_port, settings.end_port).map_err(
            |_| ConfigError::InvalidPort(settings.start_port.min(settings.end_port)),
        )?;

        Self::new(settings.workers, timeout, ports, &settings.output_file)
    }

    /// Show a progress bar while scanning each target.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    /// Maximum number of probes in flight per target.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Per-connection timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ports scanned on every target.
    pub fn ports(&self) -> PortRange {
        self.ports
    }

    /// File that open ports are appended to.
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Whether to draw a progress bar.
    pub fn progress(&self) -> bool {
        self.progress
    }
}
