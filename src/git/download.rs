// src/git/download.rs
//! Concurrent download of walked entries into a local directory.

use super::api::ContentEntry;
use crate::errors::DownloadError;
use crate::progress::ProgressReporter;
use futures::future::join_all;
use reqwest::Client;
use std::path::{Component, Path, PathBuf};

/// A file that could not be fetched or written.
#[derive(Debug)]
pub struct FailedDownload {
    /// The entry's relative name.
    pub name: String,
    /// What went wrong.
    pub error: DownloadError,
}

/// Outcome of one downloader run.
#[derive(Debug, Default)]
pub struct DownloadSummary {
    /// Local paths that were written.
    pub written: Vec<PathBuf>,
    /// Entries that failed; their files are absent.
    pub failed: Vec<FailedDownload>,
    /// Entries skipped because they had no download URL.
    pub skipped: usize,
}

enum Outcome {
    Written(PathBuf),
    Failed(FailedDownload),
    Skipped,
}

/// Resolves `name` under `root`, refusing anything that could escape it.
fn local_path_for(root: &Path, name: &str) -> Result<PathBuf, DownloadError> {
    let relative = Path::new(name);
    let is_plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if name.is_empty() || !is_plain {
        return Err(DownloadError::UnsafePath(name.to_string()));
    }
    Ok(root.join(relative))
}

/// Fetches `url` and writes the body to `dest`, creating parent directories.
///
/// A failed write removes whatever part of `dest` was written.
pub async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<u64, DownloadError> {
    log::debug!("Downloading file from: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status));
    }
    let content = response.bytes().await?;

    let io_err = |source| DownloadError::Io {
        path: dest.display().to_string(),
        source,
    };
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    if let Err(source) = tokio::fs::write(dest, &content).await {
        let _ = tokio::fs::remove_file(dest).await;
        return Err(io_err(source));
    }
    Ok(content.len() as u64)
}

async fn download_entry(client: &Client, entry: &ContentEntry, root: &Path) -> Outcome {
    let Some(url) = entry.download_url.as_deref() else {
        log::debug!("Skipping '{}': no download URL", entry.name);
        return Outcome::Skipped;
    };

    let result = match local_path_for(root, &entry.name) {
        Ok(dest) => download_file(client, url, &dest).await.map(|_| dest),
        Err(e) => Err(e),
    };

    match result {
        Ok(dest) => Outcome::Written(dest),
        Err(error) => {
            log::warn!("Failed to download '{}': {}. Skipping this file!", url, error);
            Outcome::Failed(FailedDownload {
                name: entry.name.clone(),
                error,
            })
        }
    }
}

/// Downloads every entry into `root/<entry.name>`.
///
/// All fetches are issued at once and interleave on the current task; the
/// call returns only after each of them finished. A failing entry is logged
/// and recorded in the summary without affecting the others.
pub async fn download_all(
    client: &Client,
    entries: &[ContentEntry],
    root: &Path,
    progress: &dyn ProgressReporter,
) -> DownloadSummary {
    let downloadable = entries.iter().filter(|e| e.download_url.is_some()).count();
    progress.start_stage("Downloading", Some(downloadable as u64));

    let tasks = entries.iter().map(|entry| async move {
        let outcome = download_entry(client, entry, root).await;
        if !matches!(outcome, Outcome::Skipped) {
            progress.file_done();
        }
        outcome
    });

    let mut summary = DownloadSummary::default();
    for outcome in join_all(tasks).await {
        match outcome {
            Outcome::Written(path) => summary.written.push(path),
            Outcome::Failed(failure) => summary.failed.push(failure),
            Outcome::Skipped => summary.skipped += 1,
        }
    }
    summary
}
