// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-level error taxonomy.
//!
//! Every variant is recovered locally by the orchestrator: the job is marked
//! failed and the run continues. User cancellation is not an error and is
//! reported through [`crate::JobOutcome::Cancelled`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a package name could not be turned into a runnable command.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResolveError {
    #[error("unknown package `{0}`")]
    UnknownPackage(String),

    #[error("package `{0}` is deprecated")]
    Deprecated(String),

    #[error("no installer available for `{name}` on {platform}")]
    NoInstaller { name: String, platform: String },

    #[error("installer `{installer}` for `{name}` left `{placeholder}` unresolved")]
    Template { name: String, installer: String, placeholder: String },
}

/// Failure of a single job.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum JobError {
    /// No command could be resolved; no process was spawned.
    #[error("cannot resolve command: {0}")]
    Resolution(#[from] ResolveError),

    /// The external command could not be launched.
    #[error("failed to start `{command}`: {message}")]
    ProcessStart { command: String, message: String },

    /// Reading the process output failed before end-of-stream.
    #[error("error reading output: {0}")]
    Stream(String),

    /// The output stream ended but the process reported failure.
    #[error("{}", exit_message(.code))]
    ExitStatus {
        /// Exit code, or `None` when the process was terminated by a signal
        code: Option<i32>,
        /// Last lines the process wrote to stderr
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        stderr_tail: Vec<String>,
    },
}

impl JobError {
    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Resolution(_) => "resolution",
            JobError::ProcessStart { .. } => "process_start",
            JobError::Stream(_) => "stream",
            JobError::ExitStatus { .. } => "exit_status",
        }
    }
}

fn exit_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
