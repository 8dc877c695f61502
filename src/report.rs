use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::models::{TrafficWindow, WindowSnapshot};

pub struct WindowReporter {
    log_path: PathBuf,
    interval: Duration,
}

impl WindowReporter {
    pub fn new(log_path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            log_path: log_path.into(),
            interval,
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Prints the window to stdout, appends it to the traffic log and resets it.
    pub fn report(&self, window: &mut TrafficWindow) -> WindowSnapshot {
        let stdout = io::stdout();
        let mut console = stdout.lock();
        self.report_to(window, &mut console)
    }

    pub fn report_to<W: Write>(&self, window: &mut TrafficWindow, console: &mut W) -> WindowSnapshot {
        let snapshot = window.snapshot();

        if let Err(e) = self.write_console(&snapshot, console) {
            warn!("Failed to print traffic report: {}", e);
        }
        if let Err(e) = self.append_log(&snapshot) {
            error!("Failed to write {}: {}", self.log_path.display(), e);
        }

        window.reset();
        snapshot
    }

    fn write_console<W: Write>(&self, snapshot: &WindowSnapshot, console: &mut W) -> io::Result<()> {
        let secs = self.interval.as_secs();
        writeln!(
            console,
            "Protocol counts in the last {} seconds: {}",
            secs,
            render(&snapshot.protocol_counts)
        )?;
        writeln!(
            console,
            "Bandwidth usage in the last {} seconds (bytes): {}",
            secs,
            render(&snapshot.bandwidth_usage)
        )?;
        console.flush()
    }

    /// Appends one timestamped line holding both maps as a JSON object. The file
    /// is opened and closed on every call.
    pub fn append_log(&self, snapshot: &WindowSnapshot) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let line = serde_json::to_string(snapshot).map_err(io::Error::from)?;
        writeln!(file, "LOG: {} {}", Local::now().format("%Y/%m/%d %H:%M:%S"), line)?;

        debug!("Appended window to {}", self.log_path.display());
        Ok(())
    }
}

fn render<T: serde::Serialize>(map: &T) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| String::from("{}"))
}
