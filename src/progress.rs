// src/progress.rs

//! Progress reporting for a sync run.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress of one sync run, stage by stage.
///
/// A run calls [`start_stage`](ProgressReporter::start_stage) for each stage
/// (cloning, downloading), [`file_done`](ProgressReporter::file_done) once
/// per file that finished, successful or not, and ends with exactly one of
/// [`finish_with_message`](ProgressReporter::finish_with_message) or
/// [`abandon_with_message`](ProgressReporter::abandon_with_message).
///
/// # Examples
///
/// ```
/// use regsync::progress::ProgressReporter;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Tally {
///     stage: Mutex<String>,
///     done: Mutex<u64>,
/// }
/// impl ProgressReporter for Tally {
///     fn start_stage(&self, stage: &str, _files: Option<u64>) {
///         *self.stage.lock().unwrap() = stage.to_string();
///         *self.done.lock().unwrap() = 0;
///     }
///     fn file_done(&self) {
///         *self.done.lock().unwrap() += 1;
///     }
///     fn finish_with_message(&self, _msg: String) {}
///     fn abandon_with_message(&self, _msg: String) {}
/// }
///
/// let tally = Tally::default();
/// tally.start_stage("Downloading", Some(2));
/// tally.file_done();
/// tally.file_done();
/// assert_eq!(*tally.stage.lock().unwrap(), "Downloading");
/// assert_eq!(*tally.done.lock().unwrap(), 2);
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Begins a stage. `files` is the number of files it will process, if known.
    fn start_stage(&self, stage: &str, files: Option<u64>);
    /// One file of the current stage finished.
    fn file_done(&self);
    /// The run succeeded.
    fn finish_with_message(&self, msg: String);
    /// The run failed; `msg` says why.
    fn abandon_with_message(&self, msg: String);
}

/// A `ProgressReporter` that ignores everything. Used when stderr is not a terminal.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn start_stage(&self, _stage: &str, _files: Option<u64>) {}
    fn file_done(&self) {}
    fn finish_with_message(&self, _msg: String) {}
    fn abandon_with_message(&self, _msg: String) {}
}

/// Terminal progress bar: a spinner while the file count is unknown, a bar once it is.
#[cfg(feature = "progress")]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new_spinner(),
        }
    }

    fn apply_style(&self, template: &str) {
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            self.bar.set_style(style.progress_chars("#>-"));
        }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn start_stage(&self, stage: &str, files: Option<u64>) {
        self.bar.reset();
        match files {
            Some(total) => {
                self.bar.disable_steady_tick();
                self.apply_style(
                    "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
                );
                self.bar.set_length(total);
            }
            None => {
                self.apply_style("{spinner:.green} {msg} [{elapsed_precise}]");
                self.bar.enable_steady_tick(std::time::Duration::from_millis(120));
            }
        }
        self.bar.set_message(format!("{}...", stage));
    }

    fn file_done(&self) {
        self.bar.inc(1);
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }

    fn abandon_with_message(&self, msg: String) {
        self.bar.abandon_with_message(msg);
    }
}
