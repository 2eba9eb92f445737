// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PATH lookup

use std::path::{Path, PathBuf};

/// First executable named `bin` on `PATH`.
pub fn find_on_path(bin: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| candidate(&dir, bin))
}

pub fn on_path(bin: &str) -> bool {
    find_on_path(bin).is_some()
}

fn candidate(dir: &Path, bin: &str) -> Option<PathBuf> {
    let path = dir.join(bin);
    if is_executable(&path) {
        return Some(path);
    }
    if cfg!(windows) {
        let exe = dir.join(format!("{bin}.exe"));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "which_tests.rs"]
mod tests;
