// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host platform detection

use std::path::Path;

/// The host platform as seen by installer selection.
///
/// `os` is the broad operating system (`darwin`, `linux`, `windows`,
/// `freebsd`); `family` narrows Linux to its distribution (`ubuntu`,
/// `debian`, `fedora`, `arch`, ...) and equals `os` elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os: String,
    family: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, family: impl Into<String>) -> Self {
        Self { os: os.into(), family: family.into() }
    }

    /// Detect the running platform.
    pub fn detect() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let family = if os == "linux" {
            linux_family(Path::new("/etc/os-release")).unwrap_or_else(|| os.to_string())
        } else {
            os.to_string()
        };
        Self::new(os, family)
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether a platform list admits this host. Empty lists admit all.
    pub fn matches(&self, platforms: &[String]) -> bool {
        platforms.is_empty() || platforms.iter().any(|p| p == &self.os || p == &self.family)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.os == self.family {
            f.write_str(&self.os)
        } else {
            write!(f, "{}/{}", self.os, self.family)
        }
    }
}

fn linux_family(os_release: &Path) -> Option<String> {
    let content = std::fs::read_to_string(os_release).ok()?;
    parse_os_release_id(&content)
}

/// Extract `ID` from os-release content, lowercased and unquoted.
pub(crate) fn parse_os_release_id(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("ID=")?;
        let value = value.trim_matches(|c| c == '"' || c == '\'').to_lowercase();
        (!value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
