//! `regsync` keeps a local copy of a remote repository subdirectory, typically
//! a set of regex definition files, in sync with upstream.
//!
//! Two interchangeable strategies produce the same local layout:
//! 1.  **git**: a shallow (`--depth 1`), blob-filtered, sparse clone restricted
//!     to the configured subdirectory, copied into the target directory.
//! 2.  **api**: a recursive walk of the GitHub contents API followed by a
//!     concurrent download of every file, where one failing file never sinks
//!     the rest.
//!
//! Either way the target directory ends up holding the upstream files plus an
//! empty marker file that flags it as managed.
//!
//! # Example: Library Usage
//!
//! ```no_run
//! use regsync::{update, SyncConfigBuilder};
//! use regsync::progress::NoOpProgress;
//!
//! let config = SyncConfigBuilder::new()
//!     .target("vendor/regexes")
//!     .cleanup(true)
//!     .build()
//!     .unwrap();
//!
//! let report = update(&config, "api", &NoOpProgress).unwrap();
//! println!("{} files written to {}", report.files_written, report.target.display());
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod git;
pub mod progress;
pub mod sync;

// Re-export key public types for easier use as a library
pub use config::{SyncConfig, SyncConfigBuilder};
pub use errors::{ErrorCategory, SyncError};
pub use sync::{StrategyTable, SyncMethod, SyncReport};

use crate::errors::Result;
use crate::progress::ProgressReporter;

/// Synchronizes `config.target` with the method named `method` (`"git"` or `"api"`).
///
/// # Errors
/// Returns [`SyncError::UnknownMethod`] for an unrecognized method, before any
/// filesystem change, and otherwise whatever the selected strategy reports.
pub fn update(
    config: &SyncConfig,
    method: &str,
    progress: &dyn ProgressReporter,
) -> Result<SyncReport> {
    StrategyTable::standard().update(config, method, progress)
}
