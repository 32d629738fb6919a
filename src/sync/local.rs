// src/sync/local.rs
//! Lifecycle of the local target directory.

use crate::errors::{io_error_with_path, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Clears (when `cleanup` is set) and recreates the target directory.
///
/// Callers must not run two syncs against the same path at once; nothing here
/// locks it.
pub fn prepare_target_dir(target: &Path, cleanup: bool) -> Result<()> {
    if cleanup {
        match fs::symlink_metadata(target) {
            Ok(meta) if meta.is_dir() => {
                log::debug!("Removing existing directory '{}'", target.display());
                fs::remove_dir_all(target).map_err(|e| io_error_with_path(e, target))?;
            }
            Ok(_) => {
                fs::remove_file(target).map_err(|e| io_error_with_path(e, target))?;
            }
            Err(_) => {}
        }
    }
    fs::create_dir_all(target).map_err(|e| io_error_with_path(e, target))
}

/// Writes the empty marker file that flags `target` as managed and populated.
pub fn write_marker(marker: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(marker)
        .map(|_| ())
        .map_err(|e| io_error_with_path(e, marker))
}

/// Copies everything below `source` into `dest`, returning the number of files copied.
///
/// Existing files in `dest` with the same relative path are overwritten.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source.to_path_buf());
            io_error_with_path(e.into(), path)
        })?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| io_error_with_path(e, &target))?;
        } else {
            if target.exists() {
                log::debug!("Overwriting '{}'", target.display());
            }
            fs::copy(entry.path(), &target).map_err(|e| io_error_with_path(e, &target))?;
            copied += 1;
        }
    }
    Ok(copied)
}
