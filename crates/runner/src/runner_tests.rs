// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::relay::{self, RelayReceiver};
use std::time::Instant;

fn sh(script: &str) -> CommandLine {
    CommandLine::new("sh").arg("-c").arg(script)
}

/// Run `command` to completion, collecting every relayed line.
async fn run_collect(runner: &ProcessRunner, command: CommandLine) -> (Vec<String>, JobOutcome) {
    let (tx, rx) = relay::channel();
    let handle = tokio::spawn({
        let runner = runner.clone();
        async move { runner.run(0, command, tx, CancellationToken::new()).await }
    });
    let lines = drain(rx).await;
    (lines, handle.await.unwrap())
}

async fn drain(mut rx: RelayReceiver) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }
    lines
}

#[cfg(unix)]
#[tokio::test]
async fn streams_lines_in_order_then_done() {
    let (lines, outcome) =
        run_collect(&ProcessRunner::new(), sh("echo one; echo two; printf three")).await;
    assert_eq!(lines, ["one", "two", "three"]);
    assert_eq!(outcome, JobOutcome::Done);
}

#[cfg(unix)]
#[tokio::test]
async fn no_output_is_done() {
    let (lines, outcome) = run_collect(&ProcessRunner::new(), sh("true")).await;
    assert!(lines.is_empty());
    assert_eq!(outcome, JobOutcome::Done);
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_fails_with_stderr_tail() {
    let runner = ProcessRunner::new().with_stderr_tail(2);
    let (lines, outcome) =
        run_collect(&runner, sh("echo partial; echo e1 >&2; echo e2 >&2; echo e3 >&2; exit 3"))
            .await;
    assert_eq!(lines, ["partial"]);
    assert_eq!(
        outcome,
        JobOutcome::Failed(JobError::ExitStatus {
            code: Some(3),
            stderr_tail: vec!["e2".to_string(), "e3".to_string()],
        })
    );
}

#[cfg(unix)]
#[tokio::test]
async fn crlf_and_invalid_utf8_are_decoded() {
    let (lines, _) =
        run_collect(&ProcessRunner::new(), sh(r"printf 'dos\r\n'; printf 'bad\377byte\n'")).await;
    assert_eq!(lines, ["dos", "bad\u{FFFD}byte"]);
}

#[tokio::test]
async fn missing_program_is_process_start_failure() {
    let (lines, outcome) =
        run_collect(&ProcessRunner::new(), CommandLine::new("fairie-no-such-program")).await;
    assert!(lines.is_empty());
    match outcome {
        JobOutcome::Failed(JobError::ProcessStart { command, .. }) => {
            assert_eq!(command, "fairie-no-such-program");
        }
        other => panic!("expected ProcessStart failure, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_stops_a_blocked_job() {
    let runner = ProcessRunner::new().with_kill_grace(Duration::from_millis(100));
    let (tx, mut rx) = relay::channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { runner.run(0, sh("echo started; sleep 30"), tx, cancel).await }
    });

    assert_eq!(rx.recv().await.as_deref(), Some("started"));
    let start = Instant::now();
    cancel.cancel();
    assert_eq!(handle.await.unwrap(), JobOutcome::Cancelled);
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(rx.recv().await, None);
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_kills_and_reaps_a_process_ignoring_sigterm() {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let grace = Duration::from_millis(200);
    let runner = ProcessRunner::new().with_kill_grace(grace);
    let (tx, mut rx) = relay::channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let cancel = cancel.clone();
        let script = sh("trap '' TERM; echo $$; while :; do sleep 0.05; done");
        async move { runner.run(0, script, tx, cancel).await }
    });

    let pid: i32 = rx.recv().await.unwrap().parse().unwrap();
    let start = Instant::now();
    cancel.cancel();
    assert_eq!(handle.await.unwrap(), JobOutcome::Cancelled);

    // The run only returns once the shell has been killed and reaped.
    assert!(start.elapsed() >= grace);
    assert!(kill(Pid::from_raw(pid), None).is_err(), "process {pid} still exists");
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_while_publish_is_pending() {
    let runner = ProcessRunner::new();
    let (tx, _rx) = relay::channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { runner.run(0, sh("yes"), tx, cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    assert_eq!(handle.await.unwrap(), JobOutcome::Cancelled);
}

#[cfg(unix)]
#[tokio::test]
async fn dropped_receiver_stops_the_job() {
    let runner = ProcessRunner::new();
    let (tx, rx) = relay::channel();
    drop(rx);
    let outcome = runner.run(0, sh("echo a; sleep 30"), tx, CancellationToken::new()).await;
    assert_eq!(outcome, JobOutcome::Cancelled);
}

#[yare::parameterized(
    lf      = { b"abc\n",   "abc" },
    crlf    = { b"abc\r\n", "abc" },
    no_eol  = { b"abc",     "abc" },
    empty   = { b"\n",      "" },
)]
fn decode(input: &[u8], expected: &str) {
    assert_eq!(decode_line(input), expected);
}

#[tokio::test]
async fn fake_runner_plays_script() {
    let runner = FakeRunner::new().script(
        1,
        ScriptedJob::lines(["x", "y"]).then(JobOutcome::Failed(JobError::Stream("boom".into()))),
    );
    let (tx, rx) = relay::channel();
    let handle = tokio::spawn({
        let runner = runner.clone();
        async move {
            runner.run(1, CommandLine::new("anything"), tx, CancellationToken::new()).await
        }
    });
    assert_eq!(drain(rx).await, ["x", "y"]);
    assert_eq!(handle.await.unwrap(), JobOutcome::Failed(JobError::Stream("boom".into())));
    assert_eq!(runner.calls(), vec![RunCall { index: 1, command: CommandLine::new("anything") }]);
}

#[tokio::test]
async fn fake_runner_hangs_until_cancelled() {
    let runner = FakeRunner::new().script(0, ScriptedJob::lines(["a"]).then_hang());
    let (tx, mut rx) = relay::channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let runner = runner.clone();
        let cancel = cancel.clone();
        async move { runner.run(0, CommandLine::new("x"), tx, cancel).await }
    });
    assert_eq!(rx.recv().await.as_deref(), Some("a"));
    cancel.cancel();
    assert_eq!(handle.await.unwrap(), JobOutcome::Cancelled);
    assert_eq!(runner.cancelled(), vec![0]);
}
