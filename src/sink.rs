//! Append-only persistence of open ports.
//!
//! Every worker of a scan shares one [`ResultSink`]. The output file is
//! opened once and each open port is written as a whole line under a lock,
//! so concurrent writers can never interleave or truncate each other.

use crate::error::{SinkError, SinkResult};
use crate::output;
use crate::scanner::ScanResult;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Serializes open-port results into the output file.
#[derive(Debug)]
pub struct ResultSink {
    path: PathBuf,
    file: Mutex<File>,
    echo: bool,
}

impl ResultSink {
    /// Open (or create) the output file in append mode.
    ///
    /// With `echo` set, each recorded line is mirrored to stdout.
    pub fn open(path: impl AsRef<Path>, echo: bool) -> SinkResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            echo,
        })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a result. Anything but an open port is ignored.
    pub fn record(&self, result: &ScanResult) -> SinkResult<()> {
        let Some(line) = result.open_line() else {
            return Ok(());
        };

        let mut buf = line.clone().into_bytes();
        buf.push(b'\n');

        {
            let mut file = self.file.lock().map_err(|_| SinkError::Poisoned)?;
            file.write_all(&buf)
                .and_then(|()| file.flush())
                .map_err(|source| SinkError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        debug!("recorded {}", line);
        if self.echo {
            output::print_open_port(&line);
        }
        Ok(())
    }

    /// Record a result from async code.
    ///
    /// The file write runs on tokio's blocking pool so runtime workers never
    /// wait on the lock or the disk.
    pub async fn record_async(self: Arc<Self>, result: ScanResult) -> SinkResult<()> {
        if result.open_line().is_none() {
            return Ok(());
        }

        tokio::task::spawn_blocking(move || self.record(&result))
            .await
            .map_err(|e| SinkError::WriterTask(e.to_string()))?
    }
}
