// src/cli.rs

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_BRANCH, DEFAULT_MARKER_FILE, DEFAULT_REPO_URL,
    DEFAULT_SPARSE_DIR, DEFAULT_TARGET_PATH, DEFAULT_TIMEOUT_SECS, TOKEN_ENV_VAR,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Keeps a local copy of upstream regex definition files in sync.
///
/// regsync mirrors one subdirectory of a remote repository into a local path,
/// either through a shallow sparse `git clone` or by walking the GitHub
/// contents API and downloading every file concurrently.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update regex files from the upstream source.
    #[command(name = "update-regexes", visible_alias = "update_regexes")]
    UpdateRegexes(UpdateArgs),
}

/// Options of the `update-regexes` subcommand.
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Destination path for regex files.
    #[arg(short = 'p', long, value_name = "PATH", default_value = DEFAULT_TARGET_PATH)]
    pub path: PathBuf,

    /// Git repository URL.
    #[arg(short = 'r', long, value_name = "URL", default_value = DEFAULT_REPO_URL)]
    pub repo: String,

    /// Git branch name.
    #[arg(short = 'b', long, value_name = "BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Sparse directory in the repository to fetch.
    #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_SPARSE_DIR)]
    pub dir: String,

    /// Delete existing regex files before updating.
    #[arg(short = 'c', long, action = clap::ArgAction::SetTrue)]
    pub cleanup: bool,

    /// Update method: 'git' (clone via Git) or 'api' (download via GitHub API).
    // Kept as a free-form string so an unknown method is reported by the selector.
    #[arg(short = 'm', long, value_name = "METHOD", default_value = "git")]
    pub method: String,

    /// GitHub personal access token for the API method.
    #[arg(short = 'g', long, value_name = "TOKEN", env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds for the API method (0 disables it).
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Name of the empty marker file written once the update completes.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MARKER_FILE)]
    pub marker: String,
}
