// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness: a scratch project directory and a fluent wrapper
//! around `assert_cmd`.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

/// Shell-based catalog used by most specs: each package's spec is the
/// script to run.
pub const SH_CATALOG: &str = r#"
[installers.sh]
command = "${package}"

[packages.alpha]
install = { sh = "echo alpha-out" }

[packages.beta]
install = { sh = "echo beta-out; echo beta-more" }

[packages.broken]
install = { sh = "echo partial; echo oops >&2; exit 3" }
"#;

/// `fairie` with no project directory.
pub fn cli() -> Cli {
    Cli::new(None)
}

pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    /// Project with `catalog.toml` holding [`SH_CATALOG`].
    pub fn with_sh_catalog() -> Self {
        let project = Self::empty();
        project.file("catalog.toml", SH_CATALOG);
        project
    }

    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    /// `fairie` run inside the project with state kept under `state/`.
    pub fn fairie(&self) -> Cli {
        Cli::new(Some(self))
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    fn new(project: Option<&Project>) -> Self {
        let mut cmd = Command::cargo_bin("fairie").unwrap();
        cmd.timeout(Duration::from_secs(30))
            .env("NO_COLOR", "1")
            .env("FAIRIE_PLATFORM", "linux/specs")
            .env_remove("FAIRIE_LOG")
            .env_remove("FAIRIE_TICK_MS")
            .env_remove("FAIRIE_FAILURE_HOLD_MS");
        match project {
            Some(project) => {
                cmd.current_dir(project.path()).env("FAIRIE_STATE_DIR", project.state_dir());
            }
            None => {
                cmd.env("FAIRIE_STATE_DIR", std::env::temp_dir().join("fairie-specs-state"));
            }
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn output(mut self) -> Output {
        self.cmd.output().unwrap()
    }

    pub fn passes(self) -> RunAssert {
        self.code(0)
    }

    pub fn code(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(output.status.code(), Some(code), "wrong exit code\n{}", describe(&output));
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "stdout lacks {needle:?}\n{}",
            describe(&self.output)
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout().contains(needle),
            "stdout has {needle:?}\n{}",
            describe(&self.output)
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr().contains(needle),
            "stderr lacks {needle:?}\n{}",
            describe(&self.output)
        );
        self
    }

    /// Assert the needles appear in stdout in this order.
    pub fn stdout_in_order(self, needles: &[&str]) -> Self {
        let stdout = self.stdout();
        let mut from = 0;
        for needle in needles {
            match stdout[from..].find(needle) {
                Some(at) => from += at + needle.len(),
                None => {
                    panic!("stdout lacks {needle:?} after byte {from}\n{}", describe(&self.output))
                }
            }
        }
        self
    }
}

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\n--- stdout\n{}--- stderr\n{}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
