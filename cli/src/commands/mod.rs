//! # composer-file-copy Commands
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level command:
//!
//! - `run`: Process every `extra.file-copy` rule of the project (the
//!   post-install / post-update step)
//! - `copy`: Process a single rule given on the command line
//! - `list`: Show the rules that `run` would process
//!
//! Each module defines its clap arguments struct and a handler. Handlers get
//! the global options through `Context`.
//!
use crate::common::composer::manifest::ComposerProject;
use crate::core::config::{self, Settings};
use crate::core::error::Result;
use std::path::PathBuf;

/// Processes a single ad-hoc copy rule.
pub mod copy;
/// Lists the collected copy rules.
pub mod list;
/// Processes all copy rules of the project.
pub mod run;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Canonical project directory (where `composer.json` lives).
    pub working_dir: PathBuf,
    /// Composer's verbose mode; forces debug output on every rule.
    pub verbose: bool,
}

impl Context {
    pub fn settings(&self) -> Result<Settings> {
        config::load_settings(&self.working_dir)
    }

    pub fn load_project(&self, settings: &Settings, include_dev: bool) -> Result<ComposerProject> {
        ComposerProject::load(
            &self.working_dir,
            settings,
            include_dev || settings.include_dev,
        )
    }
}
