// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install runs in plain mode against shell-backed catalogs.

use crate::prelude::*;

#[test]
fn packages_install_in_order() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--catalog", "catalog.toml", "alpha", "beta"])
        .passes()
        .stdout_in_order(&[
            "Installing alpha",
            "alpha-out",
            "✓ alpha",
            "Installing beta",
            "beta-out",
            "beta-more",
            "✓ beta",
            "2 installed, 0 failed",
        ]);
}

#[test]
fn failure_is_reported_and_run_continues() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--failure-hold-ms", "0", "--catalog", "catalog.toml"])
        .args(&["alpha", "broken", "beta"])
        .code(1)
        .stdout_in_order(&[
            "✓ alpha",
            "partial",
            "✗ broken failed: exited with status 3",
            "✓ beta",
            "2 installed, 1 failed",
        ]);
}

#[test]
fn failure_hold_comes_from_env() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .env("FAIRIE_FAILURE_HOLD_MS", "0")
        .args(&["--plain", "--catalog", "catalog.toml", "broken", "alpha"])
        .code(1)
        .stdout_has("✓ alpha");
}

#[test]
fn unknown_package_fails_without_running() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--failure-hold-ms", "0", "--catalog", "catalog.toml", "nope", "alpha"])
        .code(1)
        .stdout_has("✗ nope failed: cannot resolve command: unknown package `nope`")
        .stdout_has("1 installed, 1 failed");
}

#[test]
fn groups_expand_before_explicit_packages() {
    let project = Project::with_sh_catalog();
    project.file(
        "groups.hcl",
        r#"
software_groups {
  base = ["beta", ["alpha"]]
}
"#,
    );
    project
        .fairie()
        .args(&["--plain", "--catalog", "catalog.toml", "--groups", "groups.hcl"])
        .args(&["--group", "base", "alpha"])
        .passes()
        .stdout_in_order(&["Installing beta", "Installing alpha", "2 installed, 0 failed"]);
}

#[test]
fn per_package_logs_are_written_to_state_dir() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--failure-hold-ms", "0", "--catalog", "catalog.toml"])
        .args(&["alpha", "broken"])
        .code(1);

    let alpha = project.read("state/logs/alpha.log");
    assert!(alpha.contains("[alpha] alpha-out"), "{alpha}");
    assert!(alpha.trim_end().ends_with("[alpha] done"), "{alpha}");

    let broken = project.read("state/logs/broken.log");
    assert!(broken.contains("[broken] stderr: oops"), "{broken}");
    assert!(broken.contains("failed: exited with status 3"), "{broken}");

    assert!(project.state_dir().join("fairie.log").exists());
}

#[test]
fn stderr_is_not_shown_as_output() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--failure-hold-ms", "0", "--catalog", "catalog.toml", "broken"])
        .code(1)
        .stdout_lacks("oops");
}

#[test]
fn missing_catalog_file_is_config_error() {
    let project = Project::empty();
    project
        .fairie()
        .args(&["--plain", "--catalog", "missing.toml", "alpha"])
        .code(2)
        .stderr_has("cannot read");
}

#[test]
fn packages_without_catalog_is_config_error() {
    cli().args(&["--plain", "alpha"]).code(2).stderr_has("--catalog");
}

#[test]
fn group_without_groups_file_is_config_error() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["--plain", "--catalog", "catalog.toml", "--group", "base"])
        .code(2)
        .stderr_has("--groups");
}

#[test]
fn malformed_catalog_is_config_error() {
    let project = Project::empty();
    project.file("catalog.json", "{ not json");
    project
        .fairie()
        .args(&["--plain", "--catalog", "catalog.json", "alpha"])
        .code(2)
        .stderr_has("invalid JSON");
}
