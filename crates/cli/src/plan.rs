// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning command-line selections into a resolved job queue.

use crate::exit_error::ExitError;
use clap::Args;
use fairie_catalog::{Catalog, Groups, Platform};
use fairie_core::JobQueue;
use std::path::PathBuf;

/// Where packages come from: groups first, then explicit names.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Package catalog (.toml, .hcl, or .json)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Software groups file (.toml, .hcl, or .json)
    #[arg(long, value_name = "FILE")]
    pub groups: Option<PathBuf>,

    /// Group to install, repeatable (default: every group in --groups)
    #[arg(long = "group", value_name = "NAME")]
    pub group: Vec<String>,

    /// Packages to install after the selected groups
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl SourceArgs {
    /// Requested package names in install order, first occurrence wins.
    pub fn requested(&self) -> Result<Vec<String>, ExitError> {
        let mut names = match &self.groups {
            Some(path) => {
                let groups = Groups::load(path)?;
                if self.group.is_empty() {
                    let all: Vec<&str> = groups.names().collect();
                    groups.packages(&all[..])?
                } else {
                    groups.packages(&self.group[..])?
                }
            }
            None if !self.group.is_empty() => {
                return Err(ExitError::config("--group needs a groups file (--groups FILE)"));
            }
            None => Vec::new(),
        };
        for package in &self.packages {
            if names.contains(package) {
                tracing::debug!(package, "package already selected by a group");
                continue;
            }
            names.push(package.clone());
        }
        Ok(names)
    }

    pub fn catalog(&self, platform: Option<Platform>) -> Result<Catalog, ExitError> {
        let path = self
            .catalog
            .as_deref()
            .ok_or_else(|| ExitError::config("no package catalog given (--catalog FILE)"))?;
        let catalog = Catalog::load(path)?;
        Ok(match platform {
            Some(platform) => catalog.with_platform(platform),
            None => catalog,
        })
    }

    /// Resolve the selection against the catalog. An empty selection needs
    /// no catalog and yields an empty queue.
    pub fn queue(&self, platform: Option<Platform>) -> Result<JobQueue, ExitError> {
        let names = self.requested()?;
        if names.is_empty() {
            return Ok(JobQueue::default());
        }
        let catalog = self.catalog(platform)?;
        tracing::info!(
            platform = %catalog.platform(),
            packages = names.len(),
            "resolving packages"
        );
        Ok(JobQueue::resolve(names, &catalog))
    }
}

/// One row of `fairie list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub package: String,
    pub installer: Option<String>,
    /// Command to run, or why the package cannot be installed
    pub detail: String,
}

impl PlanRow {
    pub fn is_installable(&self) -> bool {
        self.installer.is_some()
    }
}

/// Plan every requested package, or the whole catalog when nothing was
/// selected.
pub fn plan_rows(
    source: &SourceArgs,
    platform: Option<Platform>,
) -> Result<Vec<PlanRow>, ExitError> {
    let catalog = source.catalog(platform)?;
    let mut names = source.requested()?;
    if names.is_empty() {
        names = catalog.packages().map(|(name, _)| name.to_string()).collect();
    }
    Ok(names
        .into_iter()
        .map(|package| match catalog.plan(&package) {
            Ok(plan) => PlanRow {
                package,
                installer: Some(plan.installer),
                detail: plan.command.to_string(),
            },
            Err(e) => PlanRow { package, installer: None, detail: e.to_string() },
        })
        .collect())
}

/// Aligned text table for `fairie list`.
pub fn format_rows(rows: &[PlanRow]) -> String {
    let name_width = rows.iter().map(|r| r.package.chars().count()).max().unwrap_or(0);
    let installer_width = rows
        .iter()
        .map(|r| r.installer.as_deref().unwrap_or("-").chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let installer = row.installer.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{:<name_width$}  {:<installer_width$}  {}\n",
            row.package, installer, row.detail
        ));
    }
    out
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
