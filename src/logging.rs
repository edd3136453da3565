use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Keeps the file writer flushing until the process exits.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging. The level is `info` unless `debug` is set, in which
/// case `RUST_LOG` may override the `debug` default. When `log_file` is
/// given, events are also appended to it through a non-blocking writer.
///
/// Calling this more than once is harmless; only the first subscriber wins.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    // Without debug logging a stray RUST_LOG must not turn on verbose output.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let file_layer = match log_file {
        Some(path) if FILE_GUARD.get().is_none() => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create log folder {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        _ => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
    Ok(())
}
