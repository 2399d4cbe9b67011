//! # composer-file-copy Integration Test Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: a handle on the compiled binary
//! and a throwaway Composer project (`composer.json`, optional
//! `composer.lock`, files under `vendor/`) living in a temporary directory.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Command for the compiled `composer-file-copy` binary, isolated from the
/// Composer environment variables of the machine running the tests.
pub fn file_copy_cmd() -> Command {
    let mut cmd = Command::cargo_bin("composer-file-copy")
        .expect("Failed to find composer-file-copy binary for testing");
    cmd.env_remove("COMPOSER")
        .env_remove("COMPOSER_VENDOR_DIR")
        .env_remove("COMPOSER_FILE_COPY_WORKING_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A Composer project in a temporary directory.
pub struct Project {
    dir: TempDir,
    root: PathBuf,
}

impl Project {
    /// Creates a project whose `composer.json` is `manifest`.
    pub fn new(manifest: Value) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp project dir");
        let root = dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp project dir");
        let project = Self { dir, root };
        project.write("composer.json", &manifest.to_string());
        fs::create_dir_all(project.root.join("vendor")).expect("Failed to create vendor dir");
        project
    }

    /// Writes `composer.lock` with the given non-dev and dev packages.
    pub fn lock(&self, packages: Value, packages_dev: Value) {
        self.write(
            "composer.lock",
            &json!({ "packages": packages, "packages-dev": packages_dev }).to_string(),
        );
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("Failed to create parent dir");
        fs::write(&path, content).expect("Failed to write fixture file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Command already pointed at this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = file_copy_cmd();
        cmd.arg("--working-dir").arg(&self.root);
        cmd
    }

    /// Sorted project-relative paths below `relative` (files, dirs and links).
    pub fn tree(&self, relative: &str) -> Vec<String> {
        let base = self.path(relative);
        let mut entries: Vec<String> = WalkDir::new(&base)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(&base)
                    .expect("walkdir stays below its root")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        entries.sort();
        entries
    }
}
