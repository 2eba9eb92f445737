// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help and argument specs.

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--on-failure");
}

#[test]
fn list_help_shows_usage() {
    cli().args(&["list", "--help"]).passes().stdout_has("Usage:").stdout_has("--catalog");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_policy_is_usage_error() {
    cli().args(&["--on-failure", "retry", "--plain"]).code(2).stderr_has("retry");
}

#[test]
fn no_arguments_installs_nothing() {
    cli().args(&["--plain"]).passes().stdout_has("nothing to install");
}
