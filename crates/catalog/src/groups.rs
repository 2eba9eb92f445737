// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Software groups: named, possibly nested, lists of package names

use crate::format::{self, Format};
use crate::CatalogError;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::path::Path;

/// A group entry: a package name or a nested list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GroupItem {
    Name(String),
    List(Vec<GroupItem>),
}

/// Parsed groups file.
///
/// ```toml
/// [software_groups]
/// base = ["git", ["fd", "ripgrep"]]
/// desktop = ["base-fonts", "alacritty"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Groups {
    #[serde(default, alias = "softwareGroups")]
    software_groups: IndexMap<String, GroupItem>,
}

impl Groups {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let groups: Groups = format::load(path)?;
        tracing::debug!(
            path = %path.display(),
            groups = groups.software_groups.len(),
            "loaded software groups"
        );
        Ok(groups)
    }

    pub fn parse(content: &str, format: Format) -> Result<Self, String> {
        format.parse(content)
    }

    /// Group names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.software_groups.keys().map(String::as_str)
    }

    /// Flattened package names for the given groups, in order, first
    /// occurrence wins.
    pub fn packages<S: AsRef<str>>(&self, groups: &[S]) -> Result<Vec<String>, CatalogError> {
        let mut items = Vec::with_capacity(groups.len());
        for name in groups {
            let name = name.as_ref();
            let item = self.software_groups.get(name).ok_or_else(|| CatalogError::UnknownGroup {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })?;
            items.push(item.clone());
        }
        Ok(flatten(&GroupItem::List(items)))
    }
}

/// Flatten nested group entries depth-first, dropping repeats.
pub fn flatten(item: &GroupItem) -> Vec<String> {
    let mut seen = IndexSet::new();
    flatten_into(item, &mut seen);
    seen.into_iter().collect()
}

fn flatten_into(item: &GroupItem, seen: &mut IndexSet<String>) {
    match item {
        GroupItem::Name(name) => {
            if !seen.insert(name.clone()) {
                tracing::warn!(
                    package = %name,
                    "duplicate package in software groups, keeping first"
                );
            }
        }
        GroupItem::List(items) => {
            for item in items {
                flatten_into(item, seen);
            }
        }
    }
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
