//! Log sink selection and subscriber setup.
//!
//! Runs that write their JSON to a file log to `ytcaps.log` under the XDG
//! state dir. Runs that print the JSON to a terminal or pipe (`/dev/stdout`
//! and friends) log to stderr next to it. stdout never carries log lines.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,ytcaps=debug,ytcaps_core=debug";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    StateFile,
    Stderr,
}

impl LogSink {
    /// Stderr when the output is a device or stream, the state file otherwise.
    pub fn for_output(output_path: &Path) -> Self {
        if output_path == Path::new("-") || output_path.starts_with("/dev") {
            LogSink::Stderr
        } else {
            LogSink::StateFile
        }
    }
}

/// `$XDG_STATE_HOME/ytcaps/ytcaps.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytcaps")?;
    Ok(xdg_dirs.get_state_home().join("ytcaps").join("ytcaps.log"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `sink`.
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(sink: LogSink) -> Result<()> {
    let writer = match sink {
        LogSink::StateFile => {
            let path = log_file_path()?;
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        LogSink::Stderr => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::debug!(?sink, "logging initialized");
    Ok(())
}
