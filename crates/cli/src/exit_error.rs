// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Setup code returns `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns terminal teardown and process termination.

use fairie_catalog::CatalogError;
use std::fmt;

/// Exit code for bad flags, unreadable or malformed config files.
pub const CONFIG: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(CONFIG, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<CatalogError> for ExitError {
    fn from(e: CatalogError) -> Self {
        Self::config(e.to_string())
    }
}
