// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fairie-catalog: package catalog, software groups, and command resolution
//!
//! Both files may be written as TOML, HCL, JSON, or YAML; the format is picked
//! from the file extension.

mod catalog;
mod error;
mod format;
mod groups;
mod package;
mod platform;
pub mod template;
mod which;

pub use catalog::{Catalog, Plan};
pub use error::CatalogError;
pub use format::Format;
pub use groups::{flatten, GroupItem, Groups};
pub use package::{InstallerDef, OsVariants, PackageDef, PackageSpec};
pub use platform::Platform;
pub use which::{find_on_path, on_path};
