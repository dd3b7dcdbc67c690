//! Log file setup
//!
//! The terminal belongs to the UI while it runs, so log output goes to a
//! file instead of stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid log level {0:?}")]
    Filter(String, #[source] tracing_subscriber::filter::ParseError),

    #[error("a global logger is already installed")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber, appending to `path` with the given filter.
pub fn init(path: &Path, level: &str) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_new(level).map_err(|e| LoggingError::Filter(level.to_string(), e))?;
    let file = open_log_file(path)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;
    Ok(())
}
