// src/git/mod.rs
//! Talks to the upstream repository.
//!
//! This module provides functionality to:
//! - Parse GitHub browsing and clone URLs into repository coordinates.
//! - Walk a directory through the GitHub contents API and download its files concurrently.
//! - Produce a sparse checkout of one subdirectory with the `git` executable.

// Declare the sub-modules.
mod api;
mod clone;
mod download;
mod url;

// Re-export the public-facing API.
pub use api::{build_client, fetch_tree, ContentEntry, TreeListing};
pub use clone::sparse_clone;
pub use download::{download_all, download_file, DownloadSummary, FailedDownload};
pub use url::{is_git_url, normalize_github_url, parse_clone_url, RepoCoordinate};
