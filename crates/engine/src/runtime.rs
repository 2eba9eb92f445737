// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event loop driving the orchestrator.
//!
//! One task owns all run state. It waits on a fixed set of sources (UI
//! input, the animation tick, the current job's relay and outcome, and the
//! failure-hold timer), turns whichever fires into at most one orchestrator
//! event, executes the resulting effects, and renders.
//!
//! UI input is polled first so a job that never stops printing cannot
//! starve a quit.

use crate::frontend::{Frontend, UiEvent, View, Viewport};
use crate::job_logger::JobLogger;
use crate::orchestrator::Orchestrator;
use fairie_core::{
    Effect, Event, JobError, JobOutcome, JobQueue, JobRecord, OnFailure, RunState, RunStateKind,
};
use fairie_runner::{relay, JobRunner, RelayReceiver};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Event loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub on_failure: OnFailure,
    /// How long a failure stays on screen before moving on under `Continue`
    pub failure_hold: Duration,
    /// Animation tick interval
    pub tick: Duration,
    /// Upper bound on waiting for a cancelled job to stop after a quit
    pub shutdown_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            on_failure: OnFailure::Continue,
            failure_hold: Duration::from_secs(3),
            tick: Duration::from_millis(100),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub state: RunStateKind,
    pub total: usize,
    pub history: Vec<JobRecord>,
}

impl RunReport {
    pub fn done_count(&self) -> usize {
        self.history.iter().filter(|r| !r.outcome.is_failed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.history.iter().filter(|r| r.outcome.is_failed()).count()
    }

    /// `0` all done, `1` some failed, `130` quit by the user.
    pub fn exit_code(&self) -> i32 {
        if self.state == RunStateKind::Terminated {
            130
        } else if self.failed_count() > 0 {
            1
        } else {
            0
        }
    }
}

/// What woke the loop.
enum Wake {
    Line(usize, String),
    RelayClosed(usize),
    Outcome(usize, Result<JobOutcome, oneshot::error::RecvError>),
    Ui(Option<UiEvent>),
    HoldElapsed(usize),
    Tick,
}

/// Handles for the job currently executing.
#[derive(Default)]
struct Slots {
    relay: Option<(usize, RelayReceiver)>,
    outcome: Option<(usize, oneshot::Receiver<JobOutcome>)>,
    cancel: Option<(usize, CancellationToken)>,
    hold: Option<(usize, Instant)>,
    task: Option<JoinHandle<()>>,
}

pub struct Runtime<R: JobRunner, F: Frontend> {
    orchestrator: Orchestrator,
    runner: R,
    frontend: F,
    config: RuntimeConfig,
    viewport: Viewport,
    ui_events: Option<mpsc::Receiver<UiEvent>>,
    job_logger: Option<JobLogger>,
    frame: u64,
}

impl<R: JobRunner, F: Frontend> Runtime<R, F> {
    pub fn new(queue: JobQueue, runner: R, frontend: F, config: RuntimeConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(queue, config.on_failure),
            runner,
            frontend,
            config,
            viewport: Viewport::default(),
            ui_events: None,
            job_logger: None,
            frame: 0,
        }
    }

    pub fn with_ui_events(mut self, events: mpsc::Receiver<UiEvent>) -> Self {
        self.ui_events = Some(events);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_job_logger(mut self, logger: JobLogger) -> Self {
        self.job_logger = Some(logger);
        self
    }

    /// Run until every job has been attempted or the user quits.
    pub async fn run(mut self) -> (RunReport, F) {
        let mut slots = Slots::default();
        let mut ui_events = self.ui_events.take();
        let mut ticker = tokio::time::interval(self.config.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.apply(Event::Start, &mut slots);
        self.render();

        while !self.orchestrator.state().is_terminal() {
            let wake = tokio::select! {
                biased;
                event = next_ui(&mut ui_events) => Wake::Ui(event),
                _ = ticker.tick() => Wake::Tick,
                wake = next_line(&mut slots.relay) => wake,
                wake = next_outcome(&mut slots.outcome) => wake,
                index = hold_elapsed(slots.hold) => Wake::HoldElapsed(index),
            };

            match wake {
                Wake::Line(index, line) => {
                    if let Some(logger) = &self.job_logger {
                        logger.append(&job_name(&self.orchestrator, index), &line);
                    }
                    self.apply(Event::Line { index, line }, &mut slots);
                }
                Wake::RelayClosed(index) => {
                    tracing::trace!(index, "output stream exhausted");
                    slots.relay = None;
                    continue;
                }
                Wake::Outcome(index, outcome) => {
                    slots.outcome = None;
                    slots.cancel = None;
                    slots.task = None;
                    let event = match outcome {
                        Ok(JobOutcome::Done) => Event::JobDone { index },
                        Ok(JobOutcome::Failed(error)) => Event::JobFailed { index, error },
                        Ok(JobOutcome::Cancelled) => {
                            tracing::debug!(index, "job runner reported cancellation");
                            continue;
                        }
                        Err(_) => Event::JobFailed {
                            index,
                            error: JobError::Stream("job runner stopped unexpectedly".to_string()),
                        },
                    };
                    self.log_outcome(&event);
                    self.apply(event, &mut slots);
                }
                Wake::Ui(Some(UiEvent::Quit)) => self.apply(Event::Quit, &mut slots),
                Wake::Ui(Some(UiEvent::Resume)) => self.apply(Event::Resume, &mut slots),
                Wake::Ui(Some(UiEvent::Resize { width, height })) => {
                    self.viewport = Viewport::new(width, height);
                }
                Wake::Ui(None) => {
                    tracing::debug!("ui event source closed");
                    ui_events = None;
                    continue;
                }
                Wake::HoldElapsed(index) => {
                    slots.hold = None;
                    if self.orchestrator.state().current_index() == Some(index) {
                        self.apply(Event::Resume, &mut slots);
                    }
                }
                Wake::Tick => self.frame = self.frame.wrapping_add(1),
            }
            self.render();
        }
        if let Some(task) = slots.task.take() {
            await_cancelled_job(task, self.config.shutdown_timeout).await;
        }

        let report = RunReport {
            state: self.orchestrator.state().kind(),
            total: self.orchestrator.queue().len(),
            history: self.orchestrator.history().to_vec(),
        };
        tracing::info!(
            state = %report.state,
            done = report.done_count(),
            failed = report.failed_count(),
            total = report.total,
            "run complete"
        );
        (report, self.frontend)
    }

    fn apply(&mut self, event: Event, slots: &mut Slots) {
        tracing::trace!(event = %event.log_summary(), "apply");
        let effects = self.orchestrator.apply(event);
        for effect in effects {
            self.execute(effect, slots);
        }
        if !matches!(self.orchestrator.state(), RunState::JobFailed(..)) {
            slots.hold = None;
        }
    }

    fn execute(&mut self, effect: Effect, slots: &mut Slots) {
        tracing::debug!(effect = effect.name(), fields = ?effect.fields(), "executing effect");
        match effect {
            Effect::Spawn { index, name, command } => {
                if let Some(logger) = &self.job_logger {
                    logger.append(name.as_str(), &format!("$ {command}"));
                }
                let (tx, rx) = relay::channel();
                let (outcome_tx, outcome_rx) = oneshot::channel();
                let cancel = CancellationToken::new();

                let runner = self.runner.clone();
                let token = cancel.clone();
                let task = tokio::spawn(async move {
                    let outcome = runner.run(index, command, tx, token).await;
                    let _ = outcome_tx.send(outcome);
                });

                slots.relay = Some((index, rx));
                slots.outcome = Some((index, outcome_rx));
                slots.cancel = Some((index, cancel));
                slots.task = Some(task);
            }
            Effect::Cancel { index } => {
                if let Some((running, token)) = slots.cancel.take() {
                    if running == index {
                        token.cancel();
                    }
                }
                slots.relay = None;
                slots.outcome = None;
            }
            Effect::ScheduleResume { index } => {
                slots.hold = Some((index, Instant::now() + self.config.failure_hold));
            }
        }
    }

    fn log_outcome(&self, event: &Event) {
        let Some(logger) = &self.job_logger else {
            return;
        };
        match event {
            Event::JobDone { index } => {
                logger.append(&job_name(&self.orchestrator, *index), "done");
            }
            Event::JobFailed { index, error } => {
                let name = job_name(&self.orchestrator, *index);
                if let JobError::ExitStatus { stderr_tail, .. } = error {
                    for line in stderr_tail {
                        logger.append(&name, &format!("stderr: {line}"));
                    }
                }
                logger.append(&name, &format!("failed: {error}"));
            }
            _ => {}
        }
    }

    fn render(&mut self) {
        let view = View {
            state: self.orchestrator.state(),
            queue: self.orchestrator.queue(),
            log: self.orchestrator.log(),
            history: self.orchestrator.history(),
            on_failure: self.orchestrator.on_failure(),
            viewport: self.viewport,
            frame: self.frame,
        };
        if let Err(e) = self.frontend.render(&view) {
            tracing::warn!(error = %e, "render failed");
        }
    }
}

/// Wait for a cancelled runner to stop its process.
async fn await_cancelled_job(task: JoinHandle<()>, limit: Duration) {
    match tokio::time::timeout(limit, task).await {
        Ok(Ok(())) => tracing::debug!("cancelled job stopped"),
        Ok(Err(e)) => tracing::warn!(error = %e, "job runner task failed"),
        Err(_) => tracing::warn!(
            timeout_ms = limit.as_millis() as u64,
            "cancelled job did not stop in time"
        ),
    }
}

fn job_name(orchestrator: &Orchestrator, index: usize) -> String {
    orchestrator.queue().get(index).map(|job| job.name().to_string()).unwrap_or_default()
}

async fn next_line(relay: &mut Option<(usize, RelayReceiver)>) -> Wake {
    match relay {
        Some((index, rx)) => match rx.recv().await {
            Some(line) => Wake::Line(*index, line),
            None => Wake::RelayClosed(*index),
        },
        None => std::future::pending().await,
    }
}

async fn next_outcome(outcome: &mut Option<(usize, oneshot::Receiver<JobOutcome>)>) -> Wake {
    match outcome {
        Some((index, rx)) => Wake::Outcome(*index, rx.await),
        None => std::future::pending().await,
    }
}

async fn next_ui(events: &mut Option<mpsc::Receiver<UiEvent>>) -> Option<UiEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn hold_elapsed(hold: Option<(usize, Instant)>) -> usize {
    match hold {
        Some((index, deadline)) => {
            tokio::time::sleep_until(deadline).await;
            index
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
