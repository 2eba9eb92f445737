// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the groups or catalog files.
///
/// These are configuration errors: the run never starts.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} in {path}: {message}")]
    Parse { path: PathBuf, format: crate::Format, message: String },

    #[error("unsupported file extension for {0} (expected .toml, .hcl, or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("unknown software group `{name}` (available: {available})")]
    UnknownGroup { name: String, available: String },
}
