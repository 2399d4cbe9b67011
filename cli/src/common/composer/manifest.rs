//! # Composer Manifest Loading
//!
//! File: cli/src/common/composer/manifest.rs
//!
//! ## Overview
//!
//! Reads the pieces of a Composer project the copy step needs: the root
//! package (`composer.json`), the locked dependency list (`composer.lock`) and
//! the vendor directory. Everything is exposed through the
//! `PackageMetadataProvider` trait so the rest of the tool never touches the
//! JSON files directly.
//!
//! ## Architecture
//!
//! - The manifest file name honours `$COMPOSER` (default `composer.json`); the
//!   lock file shares its stem with a `.lock` extension.
//! - A missing lock file yields an empty dependency list, matching a project
//!   that has not been installed yet.
//! - Vendor directory precedence: settings override, `$COMPOSER_VENDOR_DIR`,
//!   `config.vendor-dir` in the manifest, then `vendor`.
//!
use crate::core::config::Settings;
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Name Composer gives a root package that declares none.
pub const ANONYMOUS_ROOT_NAME: &str = "__root__";

const DEFAULT_MANIFEST: &str = "composer.json";
const DEFAULT_VENDOR_DIR: &str = "vendor";

/// One package together with its `extra` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub name: String,
    pub extra: Map<String, Value>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, extra: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            extra,
        }
    }
}

/// Supplies the host project's metadata to the resolver and rule collector.
pub trait PackageMetadataProvider {
    /// Vendor (dependency install) directory, as configured (not canonicalized).
    fn vendor_dir(&self) -> &Path;
    /// The project's own package.
    fn root_package(&self) -> &PackageInfo;
    /// Locked dependencies, in lock file order.
    fn locked_packages(&self) -> &[PackageInfo];
}

#[derive(Deserialize, Debug, Default)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    extra: Value,
    #[serde(default)]
    config: Option<RawComposerConfig>,
}

#[derive(Deserialize, Debug, Default)]
struct RawComposerConfig {
    #[serde(rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct RawLock {
    #[serde(default)]
    packages: Vec<RawPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<RawPackage>,
}

#[derive(Deserialize, Debug)]
struct RawPackage {
    name: String,
    #[serde(default)]
    extra: Value,
}

/// A Composer project loaded from disk.
#[derive(Debug, Clone)]
pub struct ComposerProject {
    vendor_dir: PathBuf,
    root: PackageInfo,
    locked: Vec<PackageInfo>,
}

impl ComposerProject {
    pub fn new(vendor_dir: PathBuf, root: PackageInfo, locked: Vec<PackageInfo>) -> Self {
        Self {
            vendor_dir,
            root,
            locked,
        }
    }

    /// Loads the project in `working_dir`. Dev packages from the lock file are
    /// only included when `include_dev` is set.
    pub fn load(working_dir: &Path, settings: &Settings, include_dev: bool) -> Result<Self> {
        let manifest_name =
            std::env::var("COMPOSER").unwrap_or_else(|_| DEFAULT_MANIFEST.to_string());
        let manifest_path = working_dir.join(&manifest_name);
        let lock_path = lock_path_for(&manifest_path);

        info!("Reading manifest {}", manifest_path.display());
        let manifest: RawManifest = read_json(&manifest_path)?;

        let vendor_dir = resolve_vendor_dir(
            working_dir,
            settings.vendor_dir.as_deref(),
            std::env::var("COMPOSER_VENDOR_DIR").ok().as_deref(),
            manifest.config.as_ref().and_then(|c| c.vendor_dir.as_deref()),
        );
        debug!("Vendor directory: {}", vendor_dir.display());

        let root = PackageInfo::new(
            manifest
                .name
                .unwrap_or_else(|| ANONYMOUS_ROOT_NAME.to_string()),
            into_extra_map(manifest.extra),
        );

        let locked = if lock_path.is_file() {
            let lock: RawLock = read_json(&lock_path)?;
            let mut packages = lock.packages;
            if include_dev {
                packages.extend(lock.packages_dev);
            }
            packages
                .into_iter()
                .map(|p| PackageInfo::new(p.name, into_extra_map(p.extra)))
                .collect()
        } else {
            debug!("No lock file at {}, no locked packages", lock_path.display());
            Vec::new()
        };

        Ok(Self::new(vendor_dir, root, locked))
    }
}

impl PackageMetadataProvider for ComposerProject {
    fn vendor_dir(&self) -> &Path {
        &self.vendor_dir
    }

    fn root_package(&self) -> &PackageInfo {
        &self.root
    }

    fn locked_packages(&self) -> &[PackageInfo] {
        &self.locked
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| {
        anyhow::anyhow!(FileCopyError::Manifest(format!(
            "{} is not valid: {}",
            path.display(),
            e
        )))
    })
}

/// `composer.json` -> `composer.lock`, `foo.json` -> `foo.lock`.
fn lock_path_for(manifest: &Path) -> PathBuf {
    match manifest.extension() {
        Some(ext) if ext == "json" => manifest.with_extension("lock"),
        _ => {
            let mut name = manifest.as_os_str().to_owned();
            name.push(".lock");
            PathBuf::from(name)
        }
    }
}

fn resolve_vendor_dir(
    working_dir: &Path,
    settings_override: Option<&str>,
    env_override: Option<&str>,
    manifest_value: Option<&str>,
) -> PathBuf {
    let chosen = settings_override
        .or(env_override.filter(|v| !v.is_empty()))
        .or(manifest_value)
        .unwrap_or(DEFAULT_VENDOR_DIR);
    working_dir.join(chosen)
}

/// PHP-encoded manifests write an empty `extra` as `[]`; anything that is not
/// an object carries no keys.
fn into_extra_map(extra: Value) -> Map<String, Value> {
    match extra {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
