// src/sync/strategies.rs
//! The two concrete sync procedures.

use super::local::{copy_tree, prepare_target_dir, write_marker};
use super::{SyncMethod, SyncReport};
use crate::config::SyncConfig;
use crate::errors::{Result, SyncError};
use crate::git::{
    build_client, download_all, download_file, fetch_tree, sparse_clone, DownloadSummary,
    FailedDownload, RepoCoordinate, TreeListing,
};
use crate::progress::ProgressReporter;
use reqwest::Client;
use std::path::Path;
use tempfile::Builder as TempDirBuilder;

/// Mirrors the sparse directory through a shallow sparse `git clone`.
///
/// The target directory is only prepared once the clone succeeded, so a
/// failing `git` leaves it untouched. The clone workspace is removed on every
/// exit path.
pub fn sync_via_git(config: &SyncConfig, progress: &dyn ProgressReporter) -> Result<SyncReport> {
    log::info!("Updating regexes using Git...");
    progress.start_stage("Cloning", None);

    let workspace = TempDirBuilder::new()
        .prefix("regsync-clone-")
        .tempdir()
        .map_err(|e| crate::errors::io_error_with_path(e, std::env::temp_dir()))?;
    sparse_clone(
        &config.repo_url,
        &config.branch,
        &config.sparse_dir,
        workspace.path(),
    )?;

    let source = workspace.path().join(&config.sparse_dir);
    if !source.is_dir() {
        return Err(SyncError::SparseDirMissing {
            dir: config.sparse_dir.clone(),
        });
    }

    progress.start_stage("Copying", None);
    prepare_target_dir(&config.target, config.cleanup)?;
    let files_written = copy_tree(&source, &config.target)?;
    write_marker(&config.marker_path())?;
    progress.finish_with_message(format!("Copied {} file(s).", files_written));

    log::info!("Regexes updated successfully via Git.");
    Ok(SyncReport {
        method: SyncMethod::Git,
        target: config.target.clone(),
        files_written,
        failures: Vec::new(),
    })
}

/// Mirrors the sparse directory by walking the GitHub contents API.
///
/// Runs on a single-threaded runtime: every request is a suspension point and
/// the per-file downloads interleave on one thread.
pub fn sync_via_api(config: &SyncConfig, progress: &dyn ProgressReporter) -> Result<SyncReport> {
    log::info!("Updating regexes using GitHub API...");

    let coordinate =
        RepoCoordinate::from_clone_url(&config.repo_url, &config.branch, &config.sparse_dir)?;
    let content_url = coordinate.contents_url(&config.api_base_url);
    let client = build_client(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SyncError::Runtime)?;

    prepare_target_dir(&config.target, config.cleanup)?;
    let summary = runtime.block_on(fetch_into_target(
        &client,
        &content_url,
        &config.target,
        &coordinate.target,
        progress,
    ))?;

    write_marker(&config.marker_path())?;
    progress.finish_with_message(format!(
        "Downloaded {} file(s), {} failed.",
        summary.written.len(),
        summary.failed.len()
    ));
    log::info!(
        "Regexes updated via API: {} written, {} failed.",
        summary.written.len(),
        summary.failed.len()
    );

    Ok(SyncReport {
        method: SyncMethod::Api,
        target: config.target.clone(),
        files_written: summary.written.len(),
        failures: summary
            .failed
            .into_iter()
            .map(|f| (f.name, f.error.to_string()))
            .collect(),
    })
}

/// Walks `content_url` and downloads what it finds under `target`.
///
/// A single-file hit is written to `target/<target_name>`.
async fn fetch_into_target(
    client: &Client,
    content_url: &str,
    target: &Path,
    target_name: &str,
    progress: &dyn ProgressReporter,
) -> Result<DownloadSummary> {
    let entries = match fetch_tree(client, content_url).await? {
        TreeListing::Entries(entries) => entries,
        TreeListing::File(entry) => {
            let mut summary = DownloadSummary::default();
            let Some(url) = entry.download_url.as_deref() else {
                log::warn!("'{}' has no download URL; nothing to fetch.", entry.name);
                summary.skipped += 1;
                return Ok(summary);
            };
            progress.start_stage("Downloading", Some(1));
            let dest = target.join(target_name);
            let result = download_file(client, url, &dest).await;
            progress.file_done();
            match result {
                Ok(_) => summary.written.push(dest),
                Err(error) => {
                    log::warn!("Failed to download '{}': {}. Skipping this file!", url, error);
                    summary.failed.push(FailedDownload {
                        name: entry.name,
                        error,
                    });
                }
            }
            return Ok(summary);
        }
    };

    if entries.is_empty() {
        log::warn!("Nothing to download from '{}'.", content_url);
    }
    Ok(download_all(client, &entries, target, progress).await)
}
