// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn finds_sh() {
    assert!(on_path("sh"));
}

#[test]
fn missing_binary() {
    assert!(find_on_path("fairie-definitely-not-installed").is_none());
}

#[cfg(unix)]
#[test]
fn candidate_requires_exec_bit() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tool");
    std::fs::write(&path, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    assert!(candidate(dir.path(), "tool").is_none());

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(candidate(dir.path(), "tool"), Some(path));
}
