// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runners: launch one command and stream its output.

use crate::relay::RelaySender;
use async_trait::async_trait;
use fairie_core::{CommandLine, JobError, JobOutcome};
use std::collections::VecDeque;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

/// Runs one job to completion.
///
/// Every output line is published to `relay` in emission order, and each
/// publish waits for the consumer. Nothing is published after the runner
/// decides on a failure. When `cancel` fires the runner stops the process
/// and returns [`JobOutcome::Cancelled`].
#[async_trait]
pub trait JobRunner: Clone + Send + Sync + 'static {
    async fn run(
        &self,
        index: usize,
        command: CommandLine,
        relay: RelaySender,
        cancel: CancellationToken,
    ) -> JobOutcome;
}

/// Runs jobs as child processes, reading stdout line by line.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    stderr_tail: usize,
    kill_grace: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self { stderr_tail: 20, kill_grace: Duration::from_secs(2) }
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trailing stderr lines kept for failure reports.
    pub fn with_stderr_tail(mut self, lines: usize) -> Self {
        self.stderr_tail = lines;
        self
    }

    /// Time between SIGTERM and SIGKILL when a job is cancelled.
    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }
}

#[async_trait]
impl JobRunner for ProcessRunner {
    async fn run(
        &self,
        index: usize,
        command: CommandLine,
        relay: RelaySender,
        cancel: CancellationToken,
    ) -> JobOutcome {
        let mut child = match Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return JobOutcome::Failed(JobError::ProcessStart {
                    command: command.to_string(),
                    message: e.to_string(),
                });
            }
        };
        tracing::debug!(index, pid = ?child.id(), %command, "job process started");

        let Some(stdout) = child.stdout.take() else {
            self.terminate(child).await;
            return JobOutcome::Failed(JobError::Stream("stdout was not captured".to_string()));
        };
        let stderr = child.stderr.take().map(|stderr| tokio::spawn(tail(stderr, self.stderr_tail)));

        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                read = reader.read_until(b'\n', &mut buf) => Some(read),
            };
            let Some(read) = read else {
                self.terminate(child).await;
                return JobOutcome::Cancelled;
            };
            match read {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    let published = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => Err(()),
                        sent = relay.publish(line) => sent.map_err(|_| ()),
                    };
                    if published.is_err() {
                        self.terminate(child).await;
                        return JobOutcome::Cancelled;
                    }
                }
                Err(e) => {
                    self.terminate(child).await;
                    return JobOutcome::Failed(JobError::Stream(e.to_string()));
                }
            }
        }

        let status = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            status = child.wait() => Some(status),
        };
        let Some(status) = status else {
            self.terminate(child).await;
            return JobOutcome::Cancelled;
        };
        let stderr_tail = match stderr {
            Some(task) => task.await.unwrap_or_default(),
            None => Vec::new(),
        };

        match status {
            Ok(status) if status.success() => JobOutcome::Done,
            Ok(status) => {
                tracing::debug!(index, code = ?status.code(), "job process exited unsuccessfully");
                JobOutcome::Failed(JobError::ExitStatus { code: status.code(), stderr_tail })
            }
            Err(e) => JobOutcome::Failed(JobError::Stream(e.to_string())),
        }
    }
}

impl ProcessRunner {
    /// Ask the process to exit, kill it once the grace period runs out,
    /// and reap it. Returns only after the process is gone.
    async fn terminate(&self, mut child: Child) {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;
            if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                tracing::debug!(pid, error = %e, "SIGTERM failed");
            }
        }

        if tokio::time::timeout(self.kill_grace, child.wait()).await.is_ok() {
            return;
        }
        tracing::debug!(pid = ?child.id(), "job process outlived SIGTERM, killing");
        if let Err(e) = child.start_kill() {
            tracing::warn!(error = %e, "failed to kill job process");
        }
        let _ = child.wait().await;
    }
}

/// Strip the line terminator and decode lossily.
fn decode_line(buf: &[u8]) -> String {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Drain a stream, keeping only its last `limit` lines.
async fn tail<R: AsyncRead + Unpin>(stream: R, limit: usize) -> Vec<String> {
    let mut lines = BufReader::new(stream).lines();
    let mut kept = VecDeque::with_capacity(limit);
    while let Ok(Some(line)) = lines.next_line().await {
        if limit == 0 {
            continue;
        }
        if kept.len() == limit {
            kept.pop_front();
        }
        kept.push_back(line);
    }
    kept.into()
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::JobRunner;
    use crate::relay::RelaySender;
    use async_trait::async_trait;
    use fairie_core::{CommandLine, JobOutcome};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    /// What a scripted job does when run.
    #[derive(Debug, Clone)]
    pub struct ScriptedJob {
        lines: Vec<String>,
        outcome: JobOutcome,
        hang: bool,
    }

    impl ScriptedJob {
        /// Publish `lines`, then succeed.
        pub fn lines<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                lines: lines.into_iter().map(Into::into).collect(),
                outcome: JobOutcome::Done,
                hang: false,
            }
        }

        /// Finish with `outcome` after the lines.
        pub fn then(mut self, outcome: JobOutcome) -> Self {
            self.outcome = outcome;
            self
        }

        /// After the lines, block until cancelled.
        pub fn then_hang(mut self) -> Self {
            self.hang = true;
            self
        }
    }

    /// Recorded runner invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RunCall {
        pub index: usize,
        pub command: CommandLine,
    }

    #[derive(Default)]
    struct FakeRunnerState {
        scripts: HashMap<usize, ScriptedJob>,
        calls: Vec<RunCall>,
        cancelled: Vec<usize>,
    }

    /// Fake runner driven by per-index scripts. Unscripted jobs succeed
    /// without output.
    #[derive(Clone, Default)]
    pub struct FakeRunner {
        inner: Arc<Mutex<FakeRunnerState>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn script(self, index: usize, job: ScriptedJob) -> Self {
            self.inner.lock().scripts.insert(index, job);
            self
        }

        pub fn calls(&self) -> Vec<RunCall> {
            self.inner.lock().calls.clone()
        }

        /// Indexes whose run observed cancellation.
        pub fn cancelled(&self) -> Vec<usize> {
            self.inner.lock().cancelled.clone()
        }
    }

    #[async_trait]
    impl JobRunner for FakeRunner {
        async fn run(
            &self,
            index: usize,
            command: CommandLine,
            relay: RelaySender,
            cancel: CancellationToken,
        ) -> JobOutcome {
            let script = {
                let mut inner = self.inner.lock();
                inner.calls.push(RunCall { index, command });
                inner
                    .scripts
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| ScriptedJob::lines(Vec::<String>::new()))
            };

            for line in script.lines {
                let published = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => false,
                    sent = relay.publish(line) => sent.is_ok(),
                };
                if !published {
                    self.inner.lock().cancelled.push(index);
                    return JobOutcome::Cancelled;
                }
            }

            if script.hang {
                cancel.cancelled().await;
                self.inner.lock().cancelled.push(index);
                return JobOutcome::Cancelled;
            }
            script.outcome
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRunner, RunCall, ScriptedJob};

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
