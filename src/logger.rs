//! File logging for `--log` runs
//!
//! The `log_*` macros used across the crate go through the `log` facade, which
//! `tracing-subscriber` bridges into a fmt layer writing plain lines to the
//! log file. Nothing is installed without `--log`, so log output never lands
//! on the terminal the review UI is drawing to.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// HTTP stack targets kept at warn unless verbose logging is asked for
const NOISY_TARGETS: [&str; 6] = ["reqwest", "hyper", "h2", "rustls", "want", "mio"];

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Shared handle to the open log file
#[derive(Clone)]
struct LogFile(Arc<Mutex<File>>);

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().flush()
    }
}

impl<'a> fmt::MakeWriter<'a> for LogFile {
    type Writer = LogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn filter(verbose: bool) -> EnvFilter {
    let mut directives = vec!["debug".to_string()];
    if !verbose {
        directives.extend(NOISY_TARGETS.iter().map(|target| format!("{target}=warn")));
    }
    EnvFilter::new(directives.join(","))
}

/// Start appending log lines to `path`.
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if is_initialized() {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_writer(LogFile(Arc::new(Mutex::new(file))))
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ));

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt_layer)
        .try_init()
        .context("Failed to install logger")?;

    let _ = INSTALLED.set(());
    Ok(())
}

pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
