// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fairie-runner: job execution and the line relay

pub mod relay;
mod runner;

pub use relay::{RelayClosed, RelayReceiver, RelaySender};
pub use runner::{JobRunner, ProcessRunner};

#[cfg(any(test, feature = "test-support"))]
pub use runner::{FakeRunner, RunCall, ScriptedJob};
