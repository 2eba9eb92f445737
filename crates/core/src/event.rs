// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events fed to the orchestrator

use crate::error::JobError;

/// One input to the orchestrator state machine.
///
/// Job events carry the index of the job they belong to. An event whose
/// index does not match the job currently running is stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin the run
    Start,
    /// A line of output from job `index`
    Line { index: usize, line: String },
    /// Job `index` exhausted its output and succeeded
    JobDone { index: usize },
    /// Job `index` failed
    JobFailed { index: usize, error: JobError },
    /// Move past a failed job
    Resume,
    /// User asked to stop
    Quit,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "run:start",
            Event::Line { .. } => "job:line",
            Event::JobDone { .. } => "job:done",
            Event::JobFailed { .. } => "job:failed",
            Event::Resume => "run:resume",
            Event::Quit => "run:quit",
        }
    }

    /// Job index carried by the event, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Event::Line { index, .. }
            | Event::JobDone { index }
            | Event::JobFailed { index, .. } => Some(*index),
            Event::Start | Event::Resume | Event::Quit => None,
        }
    }

    /// Short one-line form for trace logs. Omits line contents.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::Line { index, line } => format!("{t} index={index} len={}", line.len()),
            Event::JobDone { index } => format!("{t} index={index}"),
            Event::JobFailed { index, error } => {
                format!("{t} index={index} kind={} error={error}", error.kind())
            }
            Event::Start | Event::Resume | Event::Quit => t.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
