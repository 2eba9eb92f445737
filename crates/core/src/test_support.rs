// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{CommandLine, Event, Job, JobError, JobQueue, ResolveError};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for queue and output shapes.
pub mod strategies {
    use proptest::prelude::*;

    /// A printable output line without newlines.
    pub fn arb_line() -> impl Strategy<Value = String> {
        "[ -~]{0,40}"
    }

    /// Between zero and `max` output lines.
    pub fn arb_lines(max: usize) -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(arb_line(), 0..=max)
    }

    /// Per-job success flags for a queue of one to `max` jobs.
    pub fn arb_outcomes(max: usize) -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 1..=max)
    }
}

// ── Builders ────────────────────────────────────────────────────────────

/// A job whose command echoes its own name.
pub fn echo_job(name: &str) -> Job {
    Job::new(name, Ok(CommandLine::new("echo").arg(name)))
}

/// A job whose resolution failed.
pub fn unresolved_job(name: &str) -> Job {
    Job::new(name, Err(ResolveError::UnknownPackage(name.to_string())))
}

/// Queue of echo jobs with the given names.
pub fn echo_queue(names: &[&str]) -> JobQueue {
    JobQueue::new(names.iter().map(|name| echo_job(name)).collect())
}

// ── Event factory functions ─────────────────────────────────────────────

pub fn line_event(index: usize, line: &str) -> Event {
    Event::Line { index, line: line.to_string() }
}

pub fn done_event(index: usize) -> Event {
    Event::JobDone { index }
}

pub fn exit_failed_event(index: usize, code: i32) -> Event {
    Event::JobFailed {
        index,
        error: JobError::ExitStatus { code: Some(code), stderr_tail: vec![] },
    }
}
