// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package catalog and installer selection

use crate::format::{self, Format};
use crate::package::{InstallerDef, PackageDef};
use crate::{template, CatalogError, Platform};
use fairie_core::{CommandLine, Resolve, ResolveError};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Preference list consulted when the platform has none of its own.
const DEFAULT_PREFERENCE: &str = "default";

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    installers: IndexMap<String, InstallerDef>,
    #[serde(default, alias = "installerPreference")]
    preference: IndexMap<String, Vec<String>>,
    #[serde(default, alias = "softwarePackages")]
    packages: IndexMap<String, PackageDef>,
}

type Probe = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// How one package will be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub package: String,
    pub installer: String,
    pub command: CommandLine,
}

/// Loaded package catalog bound to a host platform.
///
/// Resolution picks, in preference order, the first installer that the
/// package defines, that admits the platform, and whose required binary
/// is available.
#[derive(Clone)]
pub struct Catalog {
    file: CatalogFile,
    platform: Platform,
    probe: Probe,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = format::load(path)?;
        tracing::debug!(
            path = %path.display(),
            packages = file.packages.len(),
            installers = file.installers.len(),
            "loaded package catalog",
        );
        Ok(Self::from_file(file))
    }

    pub fn parse(content: &str, format: Format) -> Result<Self, String> {
        format.parse(content).map(Self::from_file)
    }

    fn from_file(file: CatalogFile) -> Self {
        Self { file, platform: Platform::detect(), probe: Arc::new(crate::on_path) }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the PATH check used for `requires`.
    pub fn with_probe(mut self, probe: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn package(&self, name: &str) -> Option<&PackageDef> {
        self.file.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = (&str, &PackageDef)> {
        self.file.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Choose an installer for `name` and build its command.
    pub fn plan(&self, name: &str) -> Result<Plan, ResolveError> {
        let package =
            self.package(name).ok_or_else(|| ResolveError::UnknownPackage(name.to_string()))?;
        if package.deprecated {
            return Err(ResolveError::Deprecated(name.to_string()));
        }
        if !self.platform.matches(&package.platforms) {
            return Err(self.no_installer(name));
        }

        for installer in self.preference_for(package) {
            let Some(spec) = package.install.get(installer) else {
                continue;
            };
            let Some(def) = self.file.installers.get(installer) else {
                tracing::debug!(package = name, installer, "installer not defined in catalog");
                continue;
            };
            if !self.platform.matches(&def.platforms) {
                continue;
            }
            if let Some(bin) = def.requires.as_deref() {
                if !(self.probe)(bin) {
                    tracing::debug!(
                        package = name,
                        installer,
                        requires = bin,
                        "installer unavailable"
                    );
                    continue;
                }
            }

            let vars = HashMap::from([("package", spec.joined()), ("name", name.to_string())]);
            let mut script = template::interpolate(&def.command, &vars).map_err(|placeholder| {
                ResolveError::Template {
                    name: name.to_string(),
                    installer: installer.to_string(),
                    placeholder,
                }
            })?;
            if let Some(post) = package.post.for_platform(&self.platform) {
                script = format!("{script} && {post}");
            }
            if let Some(condition) = package.when.for_platform(&self.platform) {
                script = format!("if {condition}; then {script}; fi");
            }

            return Ok(Plan {
                package: name.to_string(),
                installer: installer.to_string(),
                command: CommandLine::shell(script),
            });
        }

        Err(self.no_installer(name))
    }

    fn preference_for<'a>(&'a self, package: &'a PackageDef) -> Vec<&'a str> {
        let preference = &self.file.preference;
        match preference
            .get(self.platform.family())
            .or_else(|| preference.get(self.platform.os()))
            .or_else(|| preference.get(DEFAULT_PREFERENCE))
        {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => package.install.keys().map(String::as_str).collect(),
        }
    }

    fn no_installer(&self, name: &str) -> ResolveError {
        ResolveError::NoInstaller { name: name.to_string(), platform: self.platform.to_string() }
    }
}

impl Resolve for Catalog {
    fn resolve(&self, name: &str) -> Result<CommandLine, ResolveError> {
        self.plan(name).map(|plan| plan.command)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("platform", &self.platform)
            .field("packages", &self.file.packages.len())
            .field("installers", &self.file.installers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
