// src/config/validation.rs

use crate::errors::{Result, SyncError};
use std::fs;
use std::io;
use std::path::Path;

fn destination_error(path: &Path, reason: impl Into<String>) -> SyncError {
    SyncError::InvalidDestination {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Makes sure `path` can serve as a sync destination.
///
/// A missing path is created. An existing path must be a directory.
///
/// # Errors
/// Returns [`SyncError::InvalidDestination`] when the path is not a directory or
/// cannot be created or accessed.
pub fn ensure_destination(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(destination_error(path, "not a directory")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    destination_error(path, "no permission to create or access it")
                }
                _ => destination_error(path, e.to_string()),
            })?;
            log::debug!("Created destination directory '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(destination_error(
            path,
            "no permission to create or access it",
        )),
        Err(e) => Err(destination_error(path, e.to_string())),
    }
}
