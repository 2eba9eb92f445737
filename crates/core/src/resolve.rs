// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of job identifiers into runnable commands.

use crate::command::CommandLine;
use crate::error::ResolveError;

/// Turns a job identifier (package name) into a runnable command.
///
/// Implemented by the package catalog, and by any closure with the same
/// signature so tests and embedders can supply their own mapping.
pub trait Resolve {
    fn resolve(&self, name: &str) -> Result<CommandLine, ResolveError>;
}

impl<F> Resolve for F
where
    F: Fn(&str) -> Result<CommandLine, ResolveError>,
{
    fn resolve(&self, name: &str) -> Result<CommandLine, ResolveError> {
        self(name)
    }
}
