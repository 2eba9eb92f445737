// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installer command template interpolation
//!
//! Lowercase `${name}` placeholders are template variables and must be
//! supplied. Anything else (`${HOME}`, `${PREFIX:-/usr}`) is shell syntax
//! and passes through untouched for `sh -c` to expand.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex pattern for ${variable_name}
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
pub static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-z_][a-z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Interpolate `${name}` placeholders with values from `vars`.
///
/// Returns the first placeholder with no value as the error.
pub fn interpolate(template: &str, vars: &HashMap<&str, String>) -> Result<String, String> {
    if let Some(missing) = VAR_PATTERN
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .find(|name| !vars.contains_key(name.as_str()))
    {
        return Err(missing);
    }

    Ok(VAR_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            vars.get(&caps[1]).cloned().unwrap_or_else(|| caps[0].to_string())
        })
        .to_string())
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
