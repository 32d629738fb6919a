// src/config/builder.rs

use super::SyncConfig;
use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_BRANCH, DEFAULT_MARKER_FILE, DEFAULT_REPO_URL,
    DEFAULT_SPARSE_DIR, DEFAULT_TARGET_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{Result, SyncError};
use crate::git::is_git_url;
use std::path::PathBuf;
use std::time::Duration;

/// Builder for [`SyncConfig`].
///
/// Unset options fall back to the upstream defaults in [`crate::constants`].
///
/// # Examples
/// ```
/// use regsync::SyncConfigBuilder;
///
/// let config = SyncConfigBuilder::new()
///     .target("vendor/regexes")
///     .branch("main")
///     .cleanup(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.branch, "main");
/// assert_eq!(config.sparse_dir, "regexes");
/// assert!(config.cleanup);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SyncConfigBuilder {
    target: Option<PathBuf>,
    repo_url: Option<String>,
    branch: Option<String>,
    sparse_dir: Option<String>,
    cleanup: Option<bool>,
    token: Option<String>,
    api_base_url: Option<String>,
    timeout: Option<Option<Duration>>,
    marker_file: Option<String>,
}

impl SyncConfigBuilder {
    /// Creates a builder with every option unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Local directory receiving the mirrored files.
    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Upstream repository clone URL.
    pub fn repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = Some(repo_url.into());
        self
    }

    /// Branch to synchronize.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Subdirectory of the repository to mirror.
    pub fn sparse_dir(mut self, sparse_dir: impl Into<String>) -> Self {
        self.sparse_dir = Some(sparse_dir.into());
        self
    }

    /// Whether to clear the target directory before writing.
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Access token for the GitHub API. Blank tokens are ignored.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Base URL of the GitHub REST API.
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(api_base_url.into());
        self
    }

    /// Per-request timeout for API calls; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Name of the marker file written at the target root.
    pub fn marker_file(mut self, marker_file: impl Into<String>) -> Self {
        self.marker_file = Some(marker_file.into());
        self
    }

    /// Validates the options and produces the [`SyncConfig`].
    ///
    /// # Errors
    /// Returns [`SyncError::InvalidConfig`] for empty or malformed values and
    /// [`SyncError::InvalidUrl`] for a repository URL with an unsupported scheme.
    pub fn build(self) -> Result<SyncConfig> {
        let repo_url = self
            .repo_url
            .unwrap_or_else(|| DEFAULT_REPO_URL.to_string());
        if !is_git_url(&repo_url) {
            return Err(SyncError::InvalidUrl {
                url: repo_url,
                reason: "expected an https://, http://, git@ or file:// repository URL"
                    .to_string(),
            });
        }

        let branch = self.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        if branch.trim().is_empty() {
            return Err(SyncError::InvalidConfig("branch must not be empty".to_string()));
        }

        let sparse_dir = self
            .sparse_dir
            .unwrap_or_else(|| DEFAULT_SPARSE_DIR.to_string())
            .trim_matches('/')
            .to_string();
        if sparse_dir.is_empty() {
            return Err(SyncError::InvalidConfig(
                "sparse directory must not be empty".to_string(),
            ));
        }
        if sparse_dir.starts_with('-') {
            return Err(SyncError::InvalidConfig(format!(
                "sparse directory '{}' must not start with '-'",
                sparse_dir
            )));
        }
        if sparse_dir.split('/').any(|s| s == "..") {
            return Err(SyncError::InvalidConfig(format!(
                "sparse directory '{}' must not contain '..'",
                sparse_dir
            )));
        }

        let marker_file = self
            .marker_file
            .unwrap_or_else(|| DEFAULT_MARKER_FILE.to_string());
        if matches!(marker_file.as_str(), "" | "." | "..") || marker_file.contains(['/', '\\']) {
            return Err(SyncError::InvalidConfig(format!(
                "marker file '{}' must be a plain file name",
                marker_file
            )));
        }

        Ok(SyncConfig {
            target: self
                .target
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_PATH)),
            repo_url,
            branch,
            sparse_dir,
            cleanup: self.cleanup.unwrap_or(false),
            token: self.token,
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout: self
                .timeout
                .unwrap_or(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))),
            marker_file,
        })
    }
}
