// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fairie list` prints the install plan without running it.

use crate::prelude::*;

const MULTI_PLATFORM: &str = r#"
[installers.brew]
command = "brew install ${package}"
platforms = ["darwin"]

[installers.apt]
command = "sudo apt-get install -y ${package}"
platforms = ["ubuntu"]

[preference]
darwin = ["brew"]
ubuntu = ["apt"]

[packages.fd]
install = { brew = "fd", apt = "fd-find" }
"#;

#[test]
fn lists_whole_catalog_with_commands() {
    let project = Project::with_sh_catalog();
    project
        .fairie()
        .args(&["list", "--catalog", "catalog.toml"])
        .passes()
        .stdout_in_order(&["alpha", "sh", "echo alpha-out", "beta", "broken"])
        .stdout_lacks("Installing");
}

#[test]
fn list_does_not_run_anything() {
    let project = Project::empty();
    project.file(
        "catalog.toml",
        r#"
[installers.sh]
command = "${package}"

[packages.touch]
install = { sh = "touch ran.txt" }
"#,
    );
    project
        .fairie()
        .args(&["list", "--catalog", "catalog.toml"])
        .passes()
        .stdout_has("touch ran.txt");
    assert!(!project.path().join("ran.txt").exists());
}

#[test]
fn platform_picks_installer() {
    let project = Project::empty();
    project.file("catalog.toml", MULTI_PLATFORM);
    project
        .fairie()
        .env("FAIRIE_PLATFORM", "darwin")
        .args(&["list", "--catalog", "catalog.toml"])
        .passes()
        .stdout_has("brew install fd");
    project
        .fairie()
        .env("FAIRIE_PLATFORM", "linux/ubuntu")
        .args(&["list", "--catalog", "catalog.toml"])
        .passes()
        .stdout_has("sudo apt-get install -y fd-find");
}

#[test]
fn uninstallable_package_exits_one() {
    let project = Project::empty();
    project.file("catalog.toml", MULTI_PLATFORM);
    project
        .fairie()
        .args(&["list", "--catalog", "catalog.toml", "fd"])
        .code(1)
        .stdout_has("no installer available for `fd` on linux/specs");
}
