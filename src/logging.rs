//! File log sink.
//!
//! The game owns the terminal in raw alternate-screen mode, so log records
//! go to the file named by `BLOCKFALL_LOG_PATH` or nowhere.

use std::time::Instant;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::Config;

/// One line per record: milliseconds since start, level, target, message.
fn dispatch(level: LevelFilter, started: Instant) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{:>8} {:<5} {}: {}",
                started.elapsed().as_millis(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
}

/// Install the file sink if a log path is configured.
///
/// Returns false when logging stays off.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };
    let file =
        fern::log_file(path).with_context(|| format!("open log file {}", path.display()))?;
    dispatch(config.log_level, Instant::now())
        .chain(file)
        .apply()
        .context("install logger")?;
    Ok(true)
}
