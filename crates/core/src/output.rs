// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output log for the job currently on screen.

use serde::{Deserialize, Serialize};

/// One entry in the output log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum LogEntry {
    /// A line read from the job's standard output
    Output(String),
    /// A note added by the orchestrator (start banner, failure marker)
    Marker(String),
}

impl LogEntry {
    pub fn text(&self) -> &str {
        match self {
            LogEntry::Output(text) | LogEntry::Marker(text) => text,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, LogEntry::Marker(_))
    }
}

/// Append-only log, cleared between jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.entries.push(LogEntry::Output(line.into()));
    }

    pub fn push_marker(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Marker(text.into()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Process output only, in arrival order.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Output(line) => Some(line.as_str()),
            LogEntry::Marker(_) => None,
        })
    }

    /// The last `n` entries.
    pub fn tail(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
