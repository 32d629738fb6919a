//! Defines the `SyncConfig` struct and how it is built.
//!
//! A `SyncConfig` is immutable once built: the sync engine only ever borrows it.
//! It can be created programmatically through [`SyncConfigBuilder`] or from the
//! command line through `TryFrom<UpdateArgs>`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::SyncConfigBuilder;
mod builder;
mod cli_conversion;
pub mod validation;

/// Everything a single sync call needs to know.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Local directory receiving the mirrored files.
    pub target: PathBuf,
    /// Upstream repository clone URL.
    pub repo_url: String,
    /// Branch to synchronize.
    pub branch: String,
    /// Subdirectory of the repository to mirror.
    pub sparse_dir: String,
    /// Whether to delete the target directory before writing into it.
    pub cleanup: bool,
    /// Access token for the GitHub API.
    pub token: Option<String>,
    /// Base URL of the GitHub REST API.
    pub api_base_url: String,
    /// Per-request timeout for API calls. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Name of the empty marker file written at the target root on completion.
    pub marker_file: String,
}

impl SyncConfig {
    /// Path of the completion marker inside the target directory.
    pub fn marker_path(&self) -> PathBuf {
        self.target.join(&self.marker_file)
    }
}

// Custom Debug implementation so the access token never reaches the logs.
impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("target", &self.target)
            .field("repo_url", &self.repo_url)
            .field("branch", &self.branch)
            .field("sparse_dir", &self.sparse_dir)
            .field("cleanup", &self.cleanup)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("marker_file", &self.marker_file)
            .finish()
    }
}
