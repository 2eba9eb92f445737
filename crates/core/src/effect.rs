// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the runtime needs to perform

use crate::command::CommandLine;
use crate::job::JobName;

/// Effects emitted by the orchestrator and executed by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch the runner for job `index` with a fresh line relay
    Spawn { index: usize, name: JobName, command: CommandLine },

    /// Stop the in-flight runner for job `index`
    Cancel { index: usize },

    /// Arm the failure-hold timer; when it fires the loop sends `Resume`
    ScheduleResume { index: usize },
}

impl Effect {
    /// Effect name for log spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Spawn { .. } => "spawn",
            Effect::Cancel { .. } => "cancel",
            Effect::ScheduleResume { .. } => "schedule_resume",
        }
    }

    /// Key-value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Spawn { index, name, command } => vec![
                ("index", index.to_string()),
                ("job", name.to_string()),
                ("command", command.to_string()),
            ],
            Effect::Cancel { index } | Effect::ScheduleResume { index } => {
                vec![("index", index.to_string())]
            }
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
