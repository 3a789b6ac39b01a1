use crate::error::CoreResult;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "popcorn.log";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_logging(default_directive: &str) {
    let _ = fmt().with_env_filter(env_filter(default_directive)).try_init();
}

/// Logs to `dir/popcorn.log`. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init_file_logging(dir: &Path, default_directive: &str) -> CoreResult<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let _ = fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter(default_directive))
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
