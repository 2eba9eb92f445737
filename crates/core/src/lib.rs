// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fairie-core: shared types for the fairie installer

pub mod macros;

pub mod clock;
pub mod command;
pub mod effect;
pub mod error;
pub mod event;
pub mod job;
pub mod output;
pub mod resolve;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::CommandLine;
pub use effect::Effect;
pub use error::{JobError, ResolveError};
pub use event::Event;
pub use job::{Job, JobName, JobOutcome, JobQueue, JobRecord, RecordOutcome};
pub use output::{LogEntry, OutputLog};
pub use resolve::Resolve;
pub use state::{OnFailure, RunState, RunStateKind};
