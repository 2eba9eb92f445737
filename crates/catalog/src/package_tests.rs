// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    one  = { PackageSpec::One("ripgrep".into()), "ripgrep" },
    many = { PackageSpec::Many(vec!["python3".into(), "python3-pip".into()]), "python3 python3-pip" },
    none = { PackageSpec::Many(vec![]), "" },
)]
fn spec_joined(spec: PackageSpec, expected: &str) {
    assert_eq!(spec.joined(), expected);
}

#[test]
fn underscore_aliases() {
    let toml = r#"
_name = "Ripgrep"
_desc = "fast grep"
_bin = "rg"
_deps = ["cargo"]
_deprecated = false
_post = "rg --version"
_platforms = ["darwin"]

[install]
brew = "ripgrep"
apt = ["ripgrep"]
"#;
    let def: PackageDef = toml::from_str(toml).unwrap();
    assert_eq!(def.display_name("ripgrep"), "Ripgrep");
    assert_eq!(def.bin, OsVariants::new(Some("rg".into())));
    assert_eq!(def.deps, ["cargo"]);
    assert_eq!(def.post, OsVariants::new(Some("rg --version".into())));
    assert_eq!(def.platforms, ["darwin"]);
    assert_eq!(def.install.keys().collect::<Vec<_>>(), ["brew", "apt"]);
    assert_eq!(def.install["apt"], PackageSpec::Many(vec!["ripgrep".into()]));
}

#[test]
fn defaults_for_minimal_package() {
    let def: PackageDef = serde_json::from_str(r#"{"install": {"brew": "jq"}}"#).unwrap();
    assert_eq!(def.display_name("jq"), "jq");
    assert!(!def.deprecated);
    assert!(def.when.is_empty());
    assert!(def.post.is_empty());
    assert!(def.platforms.is_empty());
}

#[test]
fn platform_suffixed_keys_become_variants() {
    let toml = r#"
_bin = "docker"
_when = "! test -d /Applications/Docker.app"
_post = "docker --version"
"_post:darwin" = "open -a Docker"
"_bin:windows" = "docker.exe"
"_github" = "https://github.com/docker/cli"
_service = ["docker"]

[install]
cask = "docker"
"#;
    let def: PackageDef = toml::from_str(toml).unwrap();
    assert_eq!(
        def.when,
        OsVariants::new(Some("! test -d /Applications/Docker.app".into()))
    );
    assert_eq!(
        def.post,
        OsVariants::new(Some("docker --version".into())).with_os("darwin", "open -a Docker")
    );
    assert_eq!(def.bin, OsVariants::new(Some("docker".into())).with_os("windows", "docker.exe"));
    assert_eq!(def.install.keys().collect::<Vec<_>>(), ["cask"]);
}

#[yare::parameterized(
    family_wins  = { "linux",  "ubuntu", Some("ubuntu-post") },
    os_next      = { "linux",  "fedora", Some("linux-post") },
    plain_last   = { "darwin", "darwin", Some("plain-post") },
)]
fn variant_lookup_order(os: &str, family: &str, expected: Option<&str>) {
    let variants = OsVariants::new(Some("plain-post".into()))
        .with_os("linux", "linux-post")
        .with_os("ubuntu", "ubuntu-post");
    assert_eq!(variants.for_platform(&Platform::new(os, family)), expected);
}

#[test]
fn blank_variant_counts_as_unset() {
    let variants = OsVariants::new(Some("echo hi".into())).with_os("darwin", "  ");
    assert_eq!(variants.for_platform(&Platform::new("darwin", "darwin")), None);
    assert_eq!(OsVariants::default().for_platform(&Platform::new("linux", "linux")), None);
}

#[test]
fn yaml_package_with_variants() {
    let yaml = r#"
_desc: JSON processor
_post:darwin: jq --version
install:
  brew: jq
  apt: [jq]
"#;
    let def: PackageDef = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(def.desc.as_deref(), Some("JSON processor"));
    assert_eq!(def.post, OsVariants::default().with_os("darwin", "jq --version"));
    assert_eq!(def.install["apt"], PackageSpec::Many(vec!["jq".into()]));
}

#[test]
fn installer_defaults() {
    let def: InstallerDef =
        serde_json::from_str(r#"{"command": "brew install ${package}"}"#).unwrap();
    assert!(def.platforms.is_empty());
    assert!(def.requires.is_none());
}
