mod config;
pub mod database;

pub use config::Config;
pub use database::{Database, SessionRecord, Stats};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, `~/.config/stillpoint/` by default.
///
/// Set STILLPOINT_DATA_DIR to relocate it (used by tests to stay hermetic).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STILLPOINT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(ConfigError::NoDataDir)?
            .join(".config")
            .join("stillpoint"),
    };
    std::fs::create_dir_all(&dir).map_err(|_| ConfigError::NoDataDir)?;
    Ok(dir)
}
