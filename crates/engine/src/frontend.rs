// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering seam between the event loop and a display.

use fairie_core::{JobQueue, JobRecord, OnFailure, OutputLog, RecordOutcome, RunState};
use std::io;

/// Terminal dimensions in cells. Changes only through [`UiEvent::Resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 80, height: 24 }
    }
}

/// Input delivered to the event loop by a frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    Resume,
    Resize { width: u16, height: u16 },
}

/// Display status of one queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    Failed,
}

/// Read-only snapshot handed to [`Frontend::render`].
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a RunState,
    pub queue: &'a JobQueue,
    pub log: &'a OutputLog,
    pub history: &'a [JobRecord],
    pub on_failure: OnFailure,
    pub viewport: Viewport,
    /// Animation frame, advanced on every tick
    pub frame: u64,
}

impl View<'_> {
    pub fn status(&self, index: usize) -> JobStatus {
        if let Some(record) = self.history.iter().find(|r| r.index == index) {
            return match record.outcome {
                RecordOutcome::Done => JobStatus::Done,
                RecordOutcome::Failed(_) => JobStatus::Failed,
            };
        }
        match self.state.running_index() {
            Some(running) if running == index => JobStatus::Running,
            _ => JobStatus::Pending,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.history.iter().filter(|r| r.outcome.is_failed()).count()
    }
}

/// Draws views. Must not block; errors are logged by the caller.
pub trait Frontend {
    fn render(&mut self, view: &View<'_>) -> io::Result<()>;
}

#[cfg(test)]
#[path = "frontend_tests.rs"]
mod tests;
