//! Wall-clock timing of deploy steps.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Append-only `<task>: <seconds>` log.
#[derive(Debug, Clone)]
pub struct TimingLog {
    path: PathBuf,
}

impl TimingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file if needed.
    pub fn record(&self, task_name: &str, seconds: u64, succeeded: bool) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if succeeded {
            writeln!(file, "{}: {}", task_name, seconds)
        } else {
            writeln!(file, "{}: {} (failed)", task_name, seconds)
        }
    }
}

/// Run `task`, then record how long it took when a log is configured.
///
/// The task's own result is returned untouched. Failed tasks are logged too,
/// with a `(failed)` marker. A log that cannot be written is reported as a
/// warning and never replaces the task's result.
pub fn run_timed<T, E>(
    log: Option<&TimingLog>,
    task_name: &str,
    task: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let started = Instant::now();
    let result = task();
    let seconds = started.elapsed().as_secs();

    if result.is_err() {
        tracing::warn!(task = task_name, seconds, "task failed");
    } else {
        tracing::debug!(task = task_name, seconds, "task finished");
    }

    if let Some(log) = log
        && let Err(err) = log.record(task_name, seconds, result.is_ok())
    {
        tracing::warn!(path = %log.path().display(), "could not write timing log: {}", err);
    }

    result
}
