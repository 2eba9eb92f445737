// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator state machine.
//!
//! Pure and synchronous: every [`Event`] is applied in one call that
//! returns the [`Effect`]s the event loop must carry out. The queue is
//! walked strictly in order, one job at a time.

use fairie_core::{
    Clock, Effect, Event, JobError, JobQueue, JobRecord, OnFailure, OutputLog, RecordOutcome,
    RunState, SystemClock,
};
use std::time::Instant;

pub struct Orchestrator<C: Clock = SystemClock> {
    queue: JobQueue,
    state: RunState,
    log: OutputLog,
    history: Vec<JobRecord>,
    on_failure: OnFailure,
    clock: C,
    job_started: Option<Instant>,
}

impl Orchestrator<SystemClock> {
    pub fn new(queue: JobQueue, on_failure: OnFailure) -> Self {
        Self::with_clock(queue, on_failure, SystemClock)
    }
}

impl<C: Clock> Orchestrator<C> {
    pub fn with_clock(queue: JobQueue, on_failure: OnFailure, clock: C) -> Self {
        Self {
            queue,
            state: RunState::Idle,
            log: OutputLog::new(),
            history: Vec::new(),
            on_failure,
            clock,
            job_started: None,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    /// One record per finished job, in queue order.
    pub fn history(&self) -> &[JobRecord] {
        &self.history
    }

    pub fn on_failure(&self) -> OnFailure {
        self.on_failure
    }

    /// Apply one event. Stale and out-of-state events are ignored.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state.is_terminal() {
            tracing::trace!(
                event = %event.log_summary(),
                state = %self.state.kind(),
                "ignored after run ended"
            );
            return effects;
        }

        match event {
            Event::Start => {
                if self.state == RunState::Idle {
                    tracing::info!(jobs = self.queue.len(), "run started");
                    self.start_job(0, &mut effects);
                }
            }
            Event::Line { index, line } => {
                if self.is_running(index) {
                    self.log.push_line(line);
                }
            }
            Event::JobDone { index } => {
                if self.is_running(index) {
                    self.record(index, RecordOutcome::Done);
                    self.log.clear();
                    self.start_job(index + 1, &mut effects);
                }
            }
            Event::JobFailed { index, error } => {
                if self.is_running(index) {
                    self.fail(index, error, &mut effects);
                }
            }
            Event::Resume => {
                if let RunState::JobFailed(index, _) = self.state {
                    self.log.clear();
                    self.start_job(index + 1, &mut effects);
                }
            }
            Event::Quit => {
                if let Some(index) = self.state.running_index() {
                    effects.push(Effect::Cancel { index });
                }
                tracing::info!(
                    completed = self.history.len(),
                    total = self.queue.len(),
                    "run terminated by user"
                );
                self.state = RunState::Terminated;
            }
        }
        effects
    }

    fn is_running(&self, index: usize) -> bool {
        let running = self.state.running_index() == Some(index);
        if !running {
            tracing::trace!(index, state = %self.state.kind(), "stale job event ignored");
        }
        running
    }

    fn start_job(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(job) = self.queue.get(index) else {
            let failed = self.history.iter().filter(|r| r.outcome.is_failed()).count();
            tracing::info!(total = self.queue.len(), failed, "run finished");
            self.state = RunState::Finished;
            return;
        };

        let name = job.name().clone();
        self.log.push_marker(format!("Installing {name}"));
        self.job_started = Some(self.clock.now());

        match job.command() {
            Ok(command) => {
                tracing::info!(job = %name, index, %command, "job started");
                effects.push(Effect::Spawn { index, name, command: command.clone() });
                self.state = RunState::Running(index);
            }
            Err(e) => {
                let error = JobError::Resolution(e.clone());
                self.fail(index, error, effects);
            }
        }
    }

    fn fail(&mut self, index: usize, error: JobError, effects: &mut Vec<Effect>) {
        self.record(index, RecordOutcome::Failed(error.clone()));
        let name = self.job_name(index);
        tracing::warn!(job = %name, index, kind = error.kind(), error = %error, "job failed");
        self.log.push_marker(format!("✗ {name} failed: {error}"));
        if self.on_failure == OnFailure::Continue {
            effects.push(Effect::ScheduleResume { index });
        }
        self.state = RunState::JobFailed(index, error);
    }

    fn record(&mut self, index: usize, outcome: RecordOutcome) {
        let elapsed_ms = self.job_started.take().map(|t| self.clock.elapsed_ms(t)).unwrap_or(0);
        let name = self.job_name(index);
        if !outcome.is_failed() {
            tracing::info!(job = %name, index, elapsed_ms, "job done");
        }
        self.history.push(JobRecord { index, name: name.into(), outcome, elapsed_ms });
    }

    fn job_name(&self, index: usize) -> String {
        self.queue.get(index).map(|job| job.name().to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
