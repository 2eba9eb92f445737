// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fairie-engine: orchestration of a sequential install run

mod frontend;
mod job_logger;
mod orchestrator;
mod runtime;

pub use frontend::{Frontend, JobStatus, UiEvent, View, Viewport};
pub use job_logger::JobLogger;
pub use orchestrator::Orchestrator;
pub use runtime::{RunReport, Runtime, RuntimeConfig};
