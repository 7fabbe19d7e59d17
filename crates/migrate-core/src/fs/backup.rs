use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{MigrationConfig, MigrationError, Result};

/// `backup_before_migration_<YYYYmmdd_HHMMSS>`
pub fn backup_dir_name(timestamp: DateTime<Local>) -> String {
    format!("backup_before_migration_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Directory the backup of this run goes to
pub fn backup_location(config: &MigrationConfig) -> PathBuf {
    config
        .backup_dir
        .clone()
        .unwrap_or_else(|| config.project_root.join(backup_dir_name(Local::now())))
}

/// Copy the whole source directory under the backup location. Returns the
/// backup directory (the parent of the copy).
///
/// All or nothing: a copy that fails part way is removed again, and an
/// existing backup directory is never written into.
pub fn create_backup(config: &MigrationConfig) -> Result<PathBuf> {
    let backup_dir = backup_location(config);
    let failed = |source| MigrationError::Backup {
        path: backup_dir.clone(),
        source,
    };

    if backup_dir.exists() {
        return Err(failed(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", backup_dir.display()),
        )));
    }

    if let Err(source) = copy_tree(&config.source_root(), &backup_dir.join(&config.source_dir)) {
        if let Err(cleanup) = fs::remove_dir_all(&backup_dir) {
            if backup_dir.exists() {
                warn!(backup = %backup_dir.display(), error = %cleanup, "partial backup left behind");
            }
        }
        return Err(failed(source));
    }

    info!(backup = %backup_dir.display(), "source tree backed up");
    Ok(backup_dir)
}

fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
