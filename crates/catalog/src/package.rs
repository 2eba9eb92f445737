// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package and installer definitions

use crate::Platform;
use indexmap::IndexMap;
use serde::Deserialize;

/// Package name(s) handed to an installer: one string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PackageSpec {
    One(String),
    Many(Vec<String>),
}

impl PackageSpec {
    pub fn names(&self) -> Vec<&str> {
        match self {
            PackageSpec::One(name) => vec![name.as_str()],
            PackageSpec::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Space-joined form used for `${package}`.
    pub fn joined(&self) -> String {
        self.names().join(" ")
    }
}

/// How to invoke one installer.
///
/// ```hcl
/// installers "brew" {
///   command   = "brew install ${package}"
///   platforms = ["darwin", "linux"]
///   requires  = "brew"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstallerDef {
    /// Command template; `${package}` and `${name}` are substituted
    pub command: String,
    /// Platforms this installer runs on; empty admits every platform
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Binary that must be on PATH for the installer to be usable
    #[serde(default)]
    pub requires: Option<String>,
}

/// A string that may differ per platform.
///
/// Written either as a plain key (`_post = "..."`) or with a platform
/// suffix (`_post:darwin = "..."`). Suffixed values win over the plain one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsVariants {
    any: Option<String>,
    by_os: IndexMap<String, String>,
}

impl OsVariants {
    pub fn new(any: Option<String>) -> Self {
        Self { any, by_os: IndexMap::new() }
    }

    pub fn with_os(mut self, os: impl Into<String>, value: impl Into<String>) -> Self {
        self.by_os.insert(os.into(), value.into());
        self
    }

    /// Value for `platform`: its family, then its os, then the plain value.
    pub fn for_platform(&self, platform: &Platform) -> Option<&str> {
        self.by_os
            .get(platform.family())
            .or_else(|| self.by_os.get(platform.os()))
            .or(self.any.as_ref())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.any.is_none() && self.by_os.is_empty()
    }
}

/// One entry in the package catalog.
///
/// Metadata keys accept a leading underscore (`_desc`, `_bin`, ...) so
/// existing catalogs keep working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPackageDef")]
pub struct PackageDef {
    /// Display name; defaults to the catalog key
    pub name: Option<String>,
    pub desc: Option<String>,
    /// Binary the package provides
    pub bin: OsVariants,
    /// Informational only; queue order is never rearranged
    pub deps: Vec<String>,
    pub deprecated: bool,
    /// Shell snippet run after a successful install
    pub post: OsVariants,
    /// Shell condition; the install is skipped when it fails
    pub when: OsVariants,
    /// Platforms the package applies to; empty admits every platform
    pub platforms: Vec<String>,
    /// Installer name to package spec
    pub install: IndexMap<String, PackageSpec>,
}

impl PackageDef {
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}

#[derive(Deserialize)]
struct RawPackageDef {
    #[serde(default, alias = "_name")]
    name: Option<String>,
    #[serde(default, alias = "_desc")]
    desc: Option<String>,
    #[serde(default, alias = "_bin")]
    bin: Option<String>,
    #[serde(default, alias = "_deps")]
    deps: Vec<String>,
    #[serde(default, alias = "_deprecated")]
    deprecated: bool,
    #[serde(default, alias = "_post")]
    post: Option<String>,
    #[serde(default, alias = "_when")]
    when: Option<String>,
    #[serde(default, alias = "_platforms")]
    platforms: Vec<String>,
    #[serde(default)]
    install: IndexMap<String, PackageSpec>,
    /// Everything else, including `<key>:<os>` variants
    #[serde(flatten)]
    rest: IndexMap<String, ExtraValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtraValue {
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawPackageDef> for PackageDef {
    fn from(raw: RawPackageDef) -> Self {
        let mut def = PackageDef {
            name: raw.name,
            desc: raw.desc,
            bin: OsVariants::new(raw.bin),
            deps: raw.deps,
            deprecated: raw.deprecated,
            post: OsVariants::new(raw.post),
            when: OsVariants::new(raw.when),
            platforms: raw.platforms,
            install: raw.install,
        };
        for (key, value) in raw.rest {
            let Some((field, os)) = key.trim_start_matches('_').split_once(':') else {
                tracing::trace!(key, "ignoring unknown package key");
                continue;
            };
            let ExtraValue::Text(value) = value else {
                tracing::debug!(key, "platform variant is not a string");
                continue;
            };
            let target = match field {
                "bin" => &mut def.bin,
                "post" => &mut def.post,
                "when" => &mut def.when,
                _ => {
                    tracing::trace!(key, "ignoring unknown package key");
                    continue;
                }
            };
            target.by_os.insert(os.to_string(), value);
        }
        def
    }
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
