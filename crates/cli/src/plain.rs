// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented frontend for pipes, CI logs, and `--plain`.

use crate::color;
use fairie_core::{LogEntry, RecordOutcome, RunState};
use fairie_engine::{Frontend, UiEvent, View};
use std::io::{self, Write};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Prints each log entry once, a summary per finished job, and a closing
/// tally.
pub struct PlainFrontend<W: Write> {
    out: W,
    current: Option<usize>,
    printed: usize,
    summarized: usize,
    closed: bool,
}

impl<W: Write> PlainFrontend<W> {
    pub fn new(out: W) -> Self {
        Self { out, current: None, printed: 0, summarized: 0, closed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_history(&mut self, view: &View<'_>) -> io::Result<()> {
        for record in view.history.iter().skip(self.summarized) {
            let secs = record.elapsed_ms as f64 / 1000.0;
            let line = match record.outcome {
                RecordOutcome::Done => color::ok(&format!("✓ {} ({secs:.1}s)", record.name)),
                RecordOutcome::Failed(_) => {
                    color::failed(&format!("✗ {} ({secs:.1}s)", record.name))
                }
            };
            writeln!(self.out, "{line}")?;
        }
        self.summarized = view.history.len();
        Ok(())
    }

    fn flush_log(&mut self, view: &View<'_>) -> io::Result<()> {
        let entries = view.log.entries();
        if entries.len() < self.printed {
            self.printed = 0;
        }
        for entry in &entries[self.printed..] {
            match entry {
                LogEntry::Output(line) => writeln!(self.out, "{line}")?,
                LogEntry::Marker(text) if text.starts_with('✗') => {
                    writeln!(self.out, "{}", color::failed(text))?
                }
                LogEntry::Marker(text) => writeln!(self.out, "{}", color::header(text))?,
            }
        }
        self.printed = entries.len();
        Ok(())
    }

    fn close(&mut self, view: &View<'_>) -> io::Result<()> {
        self.closed = true;
        let total = view.queue.len();
        if matches!(view.state, RunState::Terminated) {
            let done = view.history.len();
            let message = format!("interrupted after {done} of {total}");
            writeln!(self.out, "{}", color::context(&message))?;
        } else if total == 0 {
            writeln!(self.out, "{}", color::context("nothing to install"))?;
        } else {
            let failed = view.failed_count();
            let installed = view.history.len() - failed;
            writeln!(
                self.out,
                "{}",
                color::context(&format!("{installed} installed, {failed} failed"))
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Frontend for PlainFrontend<W> {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        let current = view.state.current_index();
        if current != self.current {
            self.flush_history(view)?;
            self.current = current;
            self.printed = 0;
        }
        self.flush_log(view)?;
        self.flush_history(view)?;
        if view.state.is_terminal() {
            self.close(view)?;
        }
        self.out.flush()
    }
}

/// Forward Ctrl-C and stdin commands (`q` quits, `n` or an empty line
/// resumes) to the event loop.
pub fn spawn_input(events: mpsc::Sender<UiEvent>) {
    let interrupt = events.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if interrupt.send(UiEvent::Quit).await.is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let Some(event) = parse_command(&line) else {
                continue;
            };
            if events.send(event).await.is_err() {
                break;
            }
        }
    });
}

pub(crate) fn parse_command(line: &str) -> Option<UiEvent> {
    match line.trim() {
        "" | "n" | "next" => Some(UiEvent::Resume),
        "q" | "quit" => Some(UiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
#[path = "plain_tests.rs"]
mod tests;
