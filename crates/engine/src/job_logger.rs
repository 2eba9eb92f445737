// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only logger for per-job output logs.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only logger for per-job output.
///
/// Writes timestamped lines to `<log_dir>/<job>.log`, keeping a copy of
/// everything a job printed after the screen has moved on.
///
/// Each `append()` call opens, writes, and closes the file.
pub struct JobLogger {
    log_dir: PathBuf,
}

impl JobLogger {
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn path_for(&self, job: &str) -> PathBuf {
        self.log_dir.join(format!("{}.log", sanitize(job)))
    }

    /// Append a log line for the given job.
    ///
    /// Format: `2026-01-30T08:14:09Z [job] message`
    ///
    /// Failures are logged via tracing but do not propagate.
    pub fn append(&self, job: &str, message: &str) {
        let path = self.path_for(job);
        if let Err(e) = write_line(&path, job, message) {
            tracing::warn!(job, path = %path.display(), error = %e, "failed to write job log");
        }
    }
}

fn write_line(path: &Path, job: &str, message: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} [{}] {}", format_utc_now(), job, message)?;
    Ok(())
}

fn format_utc_now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Keep job names usable as file names.
fn sanitize(job: &str) -> String {
    job.chars()
        .map(|c| if c.is_ascii_alphanumeric() || "-_.@+".contains(c) { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "job_logger_tests.rs"]
mod tests;
