//! Backup-then-write emission of the settings file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing the settings file.
#[derive(Debug, Error)]
pub enum EnvWriteError {
    #[error("failed to back up `{path}` to `{backup}`: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `content` to `path`, copying any existing file to `<path>.backup`
/// first.
///
/// The copy completes strictly before the target is opened for writing, so
/// an interrupted write never costs the previous contents. One backup
/// generation is kept; the last run wins.
///
/// Returns the backup path when a backup was made.
///
/// # Errors
///
/// Returns an error if the backup copy or the write fails.
pub fn write_with_backup(path: &Path, content: &str) -> Result<Option<PathBuf>, EnvWriteError> {
    let backup = if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(|source| EnvWriteError::Backup {
            path: path.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;
        info!("Backed up previous settings to {}", backup.display());
        Some(backup)
    } else {
        None
    };

    fs::write(path, content).map_err(|source| EnvWriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(backup)
}

/// Appends `.backup` to the full file name, extension included, so `.env`
/// maps to `.env.backup` and `out.env` to `out.env.backup`.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}
