// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn failed() -> RunState {
    RunState::JobFailed(2, JobError::Stream("eof".into()))
}

#[yare::parameterized(
    idle       = { RunState::Idle,       "idle",       false, None },
    running    = { RunState::Running(1), "running",    false, Some(1) },
    job_failed = { failed(),             "job_failed", false, Some(2) },
    finished   = { RunState::Finished,   "finished",   true,  None },
    terminated = { RunState::Terminated, "terminated", true,  None },
)]
fn state_helpers(state: RunState, kind: &str, terminal: bool, current: Option<usize>) {
    assert_eq!(state.kind().to_string(), kind);
    assert_eq!(state.is_terminal(), terminal);
    assert_eq!(state.current_index(), current);
}

#[test]
fn running_index_only_for_running() {
    assert_eq!(RunState::Running(4).running_index(), Some(4));
    assert_eq!(failed().running_index(), None);
}

#[yare::parameterized(
    cont  = { "continue", Some(OnFailure::Continue) },
    pause = { "pause",    Some(OnFailure::Pause) },
    bogus = { "retry",    None },
)]
fn on_failure_from_str(input: &str, expected: Option<OnFailure>) {
    assert_eq!(input.parse::<OnFailure>().ok(), expected);
}

#[test]
fn on_failure_defaults_to_continue() {
    assert_eq!(OnFailure::default(), OnFailure::Continue);
    assert_eq!(OnFailure::Pause.to_string(), "pause");
}
