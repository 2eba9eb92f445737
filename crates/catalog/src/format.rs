// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file formats

use crate::CatalogError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Hcl,
    Json,
    Yaml,
}

fairie_core::simple_display! {
    Format {
        Toml => "TOML",
        Hcl => "HCL",
        Json => "JSON",
        Yaml => "YAML",
    }
}

impl Format {
    pub fn for_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("hcl") => Some(Format::Hcl),
            Some("json") => Some(Format::Json),
            Some("yml" | "yaml") => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Deserialize `content` in this format. Errors are rendered to text.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Hcl => hcl::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Read and parse a file, choosing the format from its extension.
pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let format =
        Format::for_path(path).ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
    format
        .parse(&content)
        .map_err(|message| CatalogError::Parse { path: path.to_path_buf(), format, message })
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
