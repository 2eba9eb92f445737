// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state and failure policy.

use crate::error::JobError;
use serde::{Deserialize, Serialize};

/// Where the run currently is. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunState {
    /// Not yet started
    #[default]
    Idle,
    /// Job at this index is executing
    Running(usize),
    /// Job at this index failed; waiting to move on
    JobFailed(usize, JobError),
    /// Every job has been attempted
    Finished,
    /// User quit before the queue was exhausted
    Terminated,
}

impl RunState {
    pub fn kind(&self) -> RunStateKind {
        match self {
            RunState::Idle => RunStateKind::Idle,
            RunState::Running(_) => RunStateKind::Running,
            RunState::JobFailed(..) => RunStateKind::JobFailed,
            RunState::Finished => RunStateKind::Finished,
            RunState::Terminated => RunStateKind::Terminated,
        }
    }

    /// Finished and Terminated accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Finished | RunState::Terminated)
    }

    pub fn running_index(&self) -> Option<usize> {
        match self {
            RunState::Running(index) => Some(*index),
            _ => None,
        }
    }

    /// Index of the job the state refers to, running or failed.
    pub fn current_index(&self) -> Option<usize> {
        match self {
            RunState::Running(index) | RunState::JobFailed(index, _) => Some(*index),
            _ => None,
        }
    }
}

/// Fieldless mirror of [`RunState`] for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStateKind {
    Idle,
    Running,
    JobFailed,
    Finished,
    Terminated,
}

crate::simple_display! {
    RunStateKind {
        Idle => "idle",
        Running => "running",
        JobFailed => "job_failed",
        Finished => "finished",
        Terminated => "terminated",
    }
}

/// What to do after a job fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Show the failure for the hold period, then move on
    #[default]
    Continue,
    /// Stay on the failed job until the user resumes
    Pause,
}

crate::simple_display! {
    OnFailure {
        Continue => "continue",
        Pause => "pause",
    }
}

impl std::str::FromStr for OnFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(OnFailure::Continue),
            "pause" => Ok(OnFailure::Pause),
            other => Err(format!("unknown failure policy `{other}` (expected continue or pause)")),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
