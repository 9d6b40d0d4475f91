//! Application settings and paths.
//!
//! Settings layer built-in defaults under an optional JSON settings file.
//! Command-line flags are applied on top by the CLI.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default output file for discovered open ports.
pub const DEFAULT_OUTPUT_FILE: &str = "scan_results.txt";

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portscout)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories, if the platform has a home directory.
    pub fn discover() -> Option<Self> {
        let project = ProjectDirs::from("com", "portscout", "portscout")?;
        Some(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// First port to scan.
    pub start_port: u16,
    /// Last port to scan (inclusive).
    pub end_port: u16,
    /// Maximum number of probes in flight per target.
    pub workers: usize,
    /// Connection timeout in seconds.
    pub timeout_secs: f64,
    /// File that open ports are appended to.
    pub output_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            start_port: 1,
            end_port: 1024,
            workers: 10,
            timeout_secs: 0.5,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl AppSettings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the settings file in the
    /// platform config directory is used when present, and the defaults
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Paths::discover().map(|p| p.settings_file()) {
            Some(file) if file.exists() => Self::load_from(&file),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}
