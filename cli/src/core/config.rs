//! # composer-file-copy Settings
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Tool-level settings that sit next to the Composer manifest. They never
//! contain copy rules themselves (those live in `extra.file-copy` of each
//! package); they tune how the rules are discovered and resolved.
//!
//! ## Architecture
//!
//! Settings are loaded from two optional TOML files, in order of precedence:
//! 1. Project file `.file-copy.toml` in the working directory
//! 2. User file `config.toml` in the platform config dir (`directories`)
//! 3. Built-in defaults
//!
//! ```toml
//! # .file-copy.toml
//! vendor_dir = "~/shared/vendor"
//! extra_key = "file-copy"
//! root_override_key = "magento-root-dir"
//! include_dev = false
//! ```
//!
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info, warn};

/// Name of the per-project settings file.
pub const PROJECT_SETTINGS_FILENAME: &str = ".file-copy.toml";

/// Key under `extra` that carries the copy rules.
pub const DEFAULT_EXTRA_KEY: &str = "file-copy";

/// Key under the root package's `extra` that moves the project root.
pub const DEFAULT_ROOT_OVERRIDE_KEY: &str = "magento-root-dir";

/// Raw settings as they appear in a single TOML file. Every field is optional
/// so that a project file can override only what it names.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub vendor_dir: Option<String>,
    pub extra_key: Option<String>,
    pub root_override_key: Option<String>,
    pub include_dev: Option<bool>,
}

/// Effective settings after layering and expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Vendor directory override; takes precedence over the manifest.
    pub vendor_dir: Option<String>,
    pub extra_key: String,
    pub root_override_key: String,
    pub include_dev: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vendor_dir: None,
            extra_key: DEFAULT_EXTRA_KEY.to_string(),
            root_override_key: DEFAULT_ROOT_OVERRIDE_KEY.to_string(),
            include_dev: false,
        }
    }
}

/// Loads the layered settings for a project rooted at `working_dir`.
pub fn load_settings(working_dir: &Path) -> Result<Settings> {
    let user = load_user_settings()?;
    let project = load_settings_file(&working_dir.join(PROJECT_SETTINGS_FILENAME))?;
    let merged = merge_settings(user.unwrap_or_default(), project);
    let settings = finalize(merged)?;
    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

fn load_user_settings() -> Result<Option<SettingsFile>> {
    match ProjectDirs::from("org", "composer-file-copy", "composer-file-copy") {
        Some(dirs) => load_settings_file(&dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            Ok(None)
        }
    }
}

/// Reads one settings file; a missing file is not an error.
pub fn load_settings_file(path: &Path) -> Result<Option<SettingsFile>> {
    if !path.is_file() {
        debug!("Settings file not found at {}", path.display());
        return Ok(None);
    }
    info!("Loading settings from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let parsed = toml::from_str(&content).map_err(|e| {
        FileCopyError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Some(parsed))
}

/// Project values win over user values, field by field.
fn merge_settings(user: SettingsFile, project: Option<SettingsFile>) -> SettingsFile {
    let Some(project) = project else {
        return user;
    };
    SettingsFile {
        vendor_dir: project.vendor_dir.or(user.vendor_dir),
        extra_key: project.extra_key.or(user.extra_key),
        root_override_key: project.root_override_key.or(user.root_override_key),
        include_dev: project.include_dev.or(user.include_dev),
    }
}

fn finalize(file: SettingsFile) -> Result<Settings> {
    let defaults = Settings::default();
    let settings = Settings {
        vendor_dir: file
            .vendor_dir
            .map(|dir| shellexpand::tilde(&dir).into_owned()),
        extra_key: file.extra_key.unwrap_or(defaults.extra_key),
        root_override_key: file.root_override_key.unwrap_or(defaults.root_override_key),
        include_dev: file.include_dev.unwrap_or(defaults.include_dev),
    };
    if settings.extra_key.trim().is_empty() {
        anyhow::bail!(FileCopyError::Config("extra_key must not be empty".into()));
    }
    if settings.root_override_key.trim().is_empty() {
        anyhow::bail!(FileCopyError::Config(
            "root_override_key must not be empty".into()
        ));
    }
    Ok(settings)
}
