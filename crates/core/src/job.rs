// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs, the job queue, and per-job outcomes.

use crate::command::CommandLine;
use crate::error::{JobError, ResolveError};
use crate::resolve::Resolve;
use serde::{Deserialize, Serialize};

crate::define_name! {
    /// Name of the package a job installs.
    ///
    /// Opaque to the orchestrator; only the resolver interprets it.
    pub struct JobName;
}

/// One installation unit: a package name and its resolved command.
///
/// Resolution happens once, when the queue is built. A job whose
/// resolution failed stays in the queue and fails immediately when its
/// turn comes, without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    name: JobName,
    command: Result<CommandLine, ResolveError>,
}

impl Job {
    pub fn new(name: impl Into<JobName>, command: Result<CommandLine, ResolveError>) -> Self {
        Self { name: name.into(), command }
    }

    pub fn name(&self) -> &JobName {
        &self.name
    }

    pub fn command(&self) -> Result<&CommandLine, &ResolveError> {
        self.command.as_ref()
    }
}

/// Ordered, immutable sequence of jobs for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQueue {
    jobs: Vec<Job>,
}

impl JobQueue {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Resolve every name in order. Failed resolutions are kept as jobs.
    pub fn resolve<I, S>(names: I, resolver: &impl Resolve) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JobName>,
    {
        let jobs = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let command = resolver.resolve(name.as_str());
                Job { name, command }
            })
            .collect();
        Self { jobs }
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}

impl<'a> IntoIterator for &'a JobQueue {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// What a job runner reports when it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Output reached end-of-stream and the process exited successfully
    Done,
    /// The job failed; no further output follows
    Failed(JobError),
    /// The runner was told to stop; not a failure
    Cancelled,
}

crate::simple_display! {
    JobOutcome {
        Done => "done",
        Failed(..) => "failed",
        Cancelled => "cancelled",
    }
}

/// Final result of a finished job, as kept in the run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Done,
    Failed(JobError),
}

impl RecordOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RecordOutcome::Failed(_))
    }
}

/// History entry for a job that reached JobDone or JobFailed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub index: usize,
    pub name: JobName,
    pub outcome: RecordOutcome,
    pub elapsed_ms: u64,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
