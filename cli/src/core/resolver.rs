//! # Copy Rule Resolution
//!
//! File: cli/src/core/resolver.rs
//!
//! ## Overview
//!
//! Turns a raw `extra.file-copy` entry into something the copy engine can
//! work with: a validated `CopyConfig`, the project paths it is resolved
//! against, an absolute source pattern and a canonical, existing target.
//!
//! ## Architecture
//!
//! - **Validation** (`CopyConfig::validate`): `source` and `target` must be
//!   present and non-empty strings; unknown keys are rejected. `debug` is on
//!   when verbose mode is active or the entry says `true` / `"true"`.
//! - **Project base** (`ProjectPaths::resolve`): the canonical parent of the
//!   vendor directory. The root package may move the project root below it
//!   through a root-override key (`magento-root-dir` by default).
//! - **Source pattern** (`resolve_source_pattern`):
//!   - `/path` declared by the root package -> `<project base>/path`
//!   - `/path` declared by a dependency -> `<vendor>/<package>/path`
//!   - `path` -> `<vendor>/path`
//! - **Target** (`resolve_target_path`): relative targets live under the
//!   project root (override applied), absolute targets are taken as-is. A
//!   missing target is created (`0755`) before it is canonicalized.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A validated copy entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConfig {
    pub source: String,
    pub target: String,
    pub debug: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawCopyEntry {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    debug: Option<Value>,
}

impl CopyConfig {
    /// Validates one raw entry declared by `package`.
    pub fn validate(package: &str, raw: &Value, verbose: bool) -> Result<Self> {
        if !raw.is_object() {
            anyhow::bail!(FileCopyError::MalformedEntry {
                package: package.to_string(),
                reason: "expected a configuration object".into(),
            });
        }
        let entry = RawCopyEntry::deserialize(raw).map_err(|e| FileCopyError::MalformedEntry {
            package: package.to_string(),
            reason: e.to_string(),
        })?;

        let source = required(entry.source, "source", package)?;
        let target = required(entry.target, "target", package)?;
        Ok(Self {
            source,
            target,
            debug: resolve_debug(entry.debug.as_ref(), verbose),
        })
    }
}

fn required(value: Option<String>, field: &'static str, package: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FileCopyError::MissingField {
            field,
            package: package.to_string(),
        }
        .into()),
    }
}

/// Debug output is forced on in verbose mode; otherwise only an explicit
/// boolean `true` or the string `"true"` enables it.
pub fn resolve_debug(raw: Option<&Value>, verbose: bool) -> bool {
    if verbose {
        return true;
    }
    match raw {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Paths every rule of a run is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    base: PathBuf,
    root_override: Option<String>,
}

impl ProjectPaths {
    pub fn new(base: PathBuf, root_override: Option<String>) -> Self {
        Self {
            base,
            root_override,
        }
    }

    /// Computes the project base from the vendor directory and the root
    /// package's `extra` section.
    pub fn resolve(
        vendor_dir: &Path,
        root_extra: &Map<String, Value>,
        override_key: &str,
    ) -> Result<Self> {
        let base = match vendor_dir.canonicalize() {
            Ok(vendor) => vendor.parent().map(Path::to_path_buf).unwrap_or(vendor),
            Err(_) => {
                let parent = vendor_dir
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                parent.canonicalize().with_context(|| {
                    format!(
                        "Failed to resolve the project directory above {}",
                        vendor_dir.display()
                    )
                })?
            }
        };

        let root_override = match root_extra.get(override_key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                warn!("Ignoring non-string extra.{}: {}", override_key, other);
                None
            }
        };
        debug!("Project base {:?}, root override {:?}", base, root_override);
        Ok(Self::new(base, root_override))
    }

    /// Canonical parent of the vendor directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn root_override(&self) -> Option<&str> {
        self.root_override.as_deref()
    }

    /// The project base with the root override applied.
    pub fn project_root(&self) -> PathBuf {
        match &self.root_override {
            Some(sub) => self.base.join(sub.trim_start_matches('/')),
            None => self.base.clone(),
        }
    }
}

/// Builds the absolute glob pattern for a rule declared by `package`.
pub fn resolve_source_pattern(
    config: &CopyConfig,
    vendor_dir: &Path,
    package: &str,
    root_package: &str,
    paths: &ProjectPaths,
) -> PathBuf {
    let source = config.source.as_str();
    if source.starts_with('/') {
        let relative = source.trim_start_matches('/');
        if package == root_package {
            paths.base().join(relative)
        } else {
            vendor_dir.join(package).join(relative)
        }
    } else {
        vendor_dir.join(source)
    }
}

/// Resolves (and if needed creates) the target directory of a rule.
///
/// # Arguments
///
/// * `config` - The validated rule; an empty or relative `target` lives under
///   the project root, an absolute one is used as-is.
/// * `paths` - The project paths of the run.
///
/// # Returns
///
/// * `Result<PathBuf>` - The canonical target path.
///
/// # Errors
///
/// Returns `FileCopyError::InvalidTarget` if the path still cannot be
/// canonicalized after trying to create it.
pub fn resolve_target_path(config: &CopyConfig, paths: &ProjectPaths) -> Result<PathBuf> {
    let raw = Path::new(&config.target);
    let candidate = if config.target.is_empty() || !raw.is_absolute() {
        paths.project_root().join(raw)
    } else {
        raw.to_path_buf()
    };

    if candidate.canonicalize().is_err() {
        if let Err(e) = ensure_dir_exists(&candidate) {
            warn!("Could not create target {:?}: {:#}", candidate, e);
        }
    }

    candidate
        .canonicalize()
        .map_err(|_| FileCopyError::InvalidTarget { path: candidate }.into())
}
