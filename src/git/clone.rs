// src/git/clone.rs
//! Shallow, blob-filtered, sparse clones through the `git` executable.

use crate::errors::{Result, SyncError};
use std::path::Path;
use std::process::Command;

/// Runs `git` with `args`, turning a non-zero exit into [`SyncError::CloneFailed`].
fn run_git(args: &[&str]) -> Result<()> {
    let command_line = format!("git {}", args.join(" "));
    log::debug!("Running: {}", command_line);

    let output = Command::new("git")
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(SyncError::GitUnavailable)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::debug!("`{}` failed: {}", command_line, stderr);
        return Err(SyncError::CloneFailed {
            command: command_line,
            status: output.status.to_string(),
            stderr,
        });
    }
    Ok(())
}

/// Clones `branch` of `repo_url` into `workspace` with only `sparse_dir` checked out.
///
/// Equivalent to:
/// ```text
/// git clone --depth 1 --filter=blob:none --sparse --branch <branch> <repo_url> <workspace>
/// git -C <workspace> sparse-checkout set <sparse_dir>
/// ```
///
/// # Errors
/// Returns [`SyncError::GitUnavailable`] if `git` cannot be started and
/// [`SyncError::CloneFailed`] if either command exits unsuccessfully.
pub fn sparse_clone(repo_url: &str, branch: &str, sparse_dir: &str, workspace: &Path) -> Result<()> {
    let workspace_str = workspace.to_string_lossy();
    log::info!(
        "Cloning '{}' (branch '{}') into '{}'...",
        repo_url,
        branch,
        workspace_str
    );

    run_git(&[
        "clone",
        "--depth",
        "1",
        "--filter=blob:none",
        "--sparse",
        "--branch",
        branch,
        "--",
        repo_url,
        &workspace_str,
    ])?;
    run_git(&["-C", &workspace_str, "sparse-checkout", "set", sparse_dir])?;

    log::debug!("Sparse checkout of '{}' complete.", sparse_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_repository_reports_clone_failure() {
        if Command::new("git").arg("--version").output().is_err() {
            eprintln!("git not available; skipping");
            return;
        }
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("no-such-repo");
        let url = format!("file://{}", missing.display());
        let err = sparse_clone(&url, "master", "regexes", &temp.path().join("ws")).unwrap_err();
        match err {
            SyncError::CloneFailed { command, .. } => assert!(command.starts_with("git clone")),
            other => panic!("Expected CloneFailed, got {:?}", other),
        }
    }
}
