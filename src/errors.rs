//! Defines application-specific error types.
//!
//! This module provides the `SyncError` enum, which categorizes the errors a
//! sync call can end with, and `DownloadError`, the narrowed set of failures a
//! single file download is allowed to absorb without sinking the whole sync.

use crate::sync::SyncMethod;
use std::path::Path;
use thiserror::Error;

/// A `Result` alias using [`SyncError`].
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Coarse classification of a [`SyncError`], used by the command surface to
/// pick an exit code and a message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input from the caller: malformed URL, unknown method, unusable destination.
    Input,
    /// The version-control client or the hosting API failed.
    Transport,
    /// Filesystem errors during copy, runtime setup failures, defensive checks.
    Unexpected,
}

/// Errors that terminate a sync call.
#[derive(Error, Debug)]
pub enum SyncError {
    // --- Input Errors ---
    /// The browsing URL does not have the `https://github.com/<owner>/<repo>/tree/<branch>/<path>` shape.
    #[error("Invalid repository URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The requested sync method is not one of the known identifiers.
    #[error("Invalid method: {method}. Allowed: [{}]", .allowed.join(", "))]
    UnknownMethod {
        /// The identifier that was requested.
        method: String,
        /// Every identifier the selector accepts.
        allowed: Vec<&'static str>,
    },

    /// The destination path cannot be used as a sync target.
    #[error("Invalid destination '{path}': {reason}")]
    InvalidDestination {
        /// The destination path.
        path: String,
        /// Why it cannot be used.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // --- Transport Errors ---
    /// The `git` subprocess exited with a non-zero status.
    #[error("Git operation failed: `{command}` exited with {status}: {stderr}")]
    CloneFailed {
        /// The command line that was run.
        command: String,
        /// The exit status, rendered.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The `git` executable could not be started.
    #[error("Failed to run git: {0}")]
    GitUnavailable(#[source] std::io::Error),

    /// The sparse checkout did not produce the requested subdirectory.
    #[error("Directory '{dir}' not found in the cloned repository")]
    SparseDirMissing {
        /// The configured sparse directory.
        dir: String,
    },

    /// A listing request failed at the transport level.
    #[error("GitHub API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A listing response could not be decoded.
    #[error("Failed to decode GitHub API response from '{url}': {source}")]
    Decode {
        /// The listing URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // --- Unexpected Errors ---
    /// The selector has no procedure bound to a known method.
    #[error("No update function registered for method: {0}")]
    UnregisteredStrategy(SyncMethod),

    /// Error occurring during file or directory access.
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// The async runtime for the API strategy could not be built.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl SyncError {
    /// Classifies this error for the command surface.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::InvalidUrl { .. }
            | SyncError::UnknownMethod { .. }
            | SyncError::InvalidDestination { .. }
            | SyncError::InvalidConfig(_) => ErrorCategory::Input,
            SyncError::CloneFailed { .. }
            | SyncError::GitUnavailable(_)
            | SyncError::SparseDirMissing { .. }
            | SyncError::Http(_)
            | SyncError::Decode { .. } => ErrorCategory::Transport,
            SyncError::UnregisteredStrategy(_) | SyncError::Io { .. } | SyncError::Runtime(_) => {
                ErrorCategory::Unexpected
            }
        }
    }
}

/// A single file that could not be downloaded. Never aborts the sync.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Connection failure, timeout, or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The downloaded bytes could not be written.
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The local path being written.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// The entry name would escape the target directory.
    #[error("refusing to write outside the target directory: '{0}'")]
    UnsafePath(String),
}

/// Helper function to create a `SyncError::Io` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error, convertible to `AsRef<Path>`.
pub fn io_error_with_path<P: AsRef<Path>>(source: std::io::Error, path: P) -> SyncError {
    SyncError::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
