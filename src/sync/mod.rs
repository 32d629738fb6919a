// src/sync/mod.rs
//! Selects and runs a sync strategy.
//!
//! The set of methods is closed ([`SyncMethod`]) and bound to procedures by an
//! immutable [`StrategyTable`] built once; dispatch is a plain lookup.

use crate::config::SyncConfig;
use crate::errors::{Result, SyncError};
use crate::progress::ProgressReporter;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod local;
mod strategies;

pub use strategies::{sync_via_api, sync_via_git};

/// The ways a target directory can be synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMethod {
    /// Shallow sparse clone with the `git` executable.
    Git,
    /// Tree walk and concurrent download through the GitHub contents API.
    Api,
}

impl SyncMethod {
    /// Every method, in the order they are listed to users.
    pub const ALL: [SyncMethod; 2] = [SyncMethod::Git, SyncMethod::Api];

    /// The identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncMethod::Git => "git",
            SyncMethod::Api => "api",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMethod {
    type Err = SyncError;

    /// Parses a method identifier, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        SyncMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| SyncError::UnknownMethod {
                method: s.to_string(),
                allowed: SyncMethod::ALL.iter().map(|m| m.as_str()).collect(),
            })
    }
}

/// What a finished sync did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// The method that ran.
    pub method: SyncMethod,
    /// The populated target directory.
    pub target: PathBuf,
    /// Number of files written.
    pub files_written: usize,
    /// `(relative name, reason)` for every file that could not be fetched.
    pub failures: Vec<(String, String)>,
}

/// A sync procedure bound to a [`SyncMethod`].
pub type SyncProcedure = fn(&SyncConfig, &dyn ProgressReporter) -> Result<SyncReport>;

/// Immutable mapping from [`SyncMethod`] to its procedure.
#[derive(Clone, Copy)]
pub struct StrategyTable {
    entries: &'static [(SyncMethod, SyncProcedure)],
}

static STANDARD_STRATEGIES: [(SyncMethod, SyncProcedure); 2] = [
    (SyncMethod::Git, sync_via_git),
    (SyncMethod::Api, sync_via_api),
];

impl StrategyTable {
    /// The table binding every method to its built-in procedure.
    pub fn standard() -> Self {
        Self {
            entries: &STANDARD_STRATEGIES,
        }
    }

    /// A table over arbitrary bindings.
    pub fn new(entries: &'static [(SyncMethod, SyncProcedure)]) -> Self {
        Self { entries }
    }

    /// Looks up the procedure bound to `method`.
    ///
    /// # Errors
    /// Returns [`SyncError::UnregisteredStrategy`] if nothing is bound to it.
    pub fn procedure_for(&self, method: SyncMethod) -> Result<SyncProcedure> {
        self.entries
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, procedure)| *procedure)
            .ok_or(SyncError::UnregisteredStrategy(method))
    }

    /// Runs the procedure bound to `method` against `config`.
    pub fn dispatch(
        &self,
        method: SyncMethod,
        config: &SyncConfig,
        progress: &dyn ProgressReporter,
    ) -> Result<SyncReport> {
        let procedure = self.procedure_for(method)?;
        let _span = tracing::info_span!("sync", method = %method).entered();
        log::debug!("Dispatching {} sync into '{}'", method, config.target.display());
        let result = procedure(config, progress);
        if let Err(e) = &result {
            progress.abandon_with_message(format!("{} sync failed: {}", method, e));
        }
        result
    }

    /// Validates `method` and runs the bound procedure.
    ///
    /// # Errors
    /// Returns [`SyncError::UnknownMethod`] before anything is touched when
    /// `method` is not a known identifier.
    pub fn update(
        &self,
        config: &SyncConfig,
        method: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<SyncReport> {
        let method: SyncMethod = method.parse()?;
        self.dispatch(method, config, progress)
    }
}

impl fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(m, _)| m))
            .finish()
    }
}
