// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use fairie_catalog::Platform;
use std::path::PathBuf;
use std::time::Duration;

/// Resolve state directory: FAIRIE_STATE_DIR > XDG_STATE_HOME/fairie > ~/.local/state/fairie
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("FAIRIE_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("fairie"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/fairie"))
}

/// Log filter directive (EnvFilter syntax), default `info`.
pub fn log_filter() -> String {
    std::env::var("FAIRIE_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".into())
}

/// Animation tick override
pub fn tick() -> Option<Duration> {
    millis("FAIRIE_TICK_MS")
}

/// How long a failed job stays on screen under the `continue` policy
pub fn failure_hold() -> Option<Duration> {
    millis("FAIRIE_FAILURE_HOLD_MS")
}

/// Platform override as `os` or `os/family`, e.g. `linux/fedora`.
pub fn platform() -> Option<Platform> {
    std::env::var("FAIRIE_PLATFORM").ok().and_then(|s| parse_platform(&s))
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

pub(crate) fn parse_platform(value: &str) -> Option<Platform> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.split_once('/') {
        Some((os, family)) if !os.is_empty() && !family.is_empty() => {
            Some(Platform::new(os, family))
        }
        Some(_) => None,
        None => Some(Platform::new(value, value)),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
