//! Logging setup.

use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILE: &str = "signal-engine.log";

/// Setup logging with the given level.
///
/// `RUST_LOG` overrides `level` when set. Console output is pretty or JSON;
/// with a `file`, JSON lines are also written there through a background
/// writer. Keep the returned guard alive until exit or buffered lines are
/// lost.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().pretty().boxed()
    };

    let (file_layer, guard) = match file.map(file_writer) {
        Some((writer, guard)) => (
            Some(fmt::layer().json().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    tracing::debug!(level, json, file = ?file, "Logging initialized");
    guard
}

/// Non-blocking writer appending to `path` (no rotation).
pub fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));

    tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
}
