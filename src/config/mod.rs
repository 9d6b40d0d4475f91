//! Configuration management for portscout.
//!
//! Settings come from built-in defaults, an optional JSON settings file and
//! the command line; the merged result is frozen into a [`ScanConfig`].

mod scan_config;
mod settings;

pub use scan_config::ScanConfig;
pub use settings::{AppSettings, Paths, DEFAULT_OUTPUT_FILE};
