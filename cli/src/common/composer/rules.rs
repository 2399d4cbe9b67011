//! # Copy Rule Collection
//!
//! File: cli/src/common/composer/rules.rs
//!
//! ## Overview
//!
//! Gathers the `extra.file-copy` settings of the root package and of every
//! locked package, drops settings that do not have the expected shape, and
//! turns the remaining entries into validated `CopyRule`s.
//!
//! ## Architecture
//!
//! 1. Root package first, then locked packages in lock order. A package name
//!    seen twice keeps its first position and its last settings.
//! 2. Settings must be an array of objects, an object of objects or a single
//!    entry object. Anything else is reported through the diagnostic sink and
//!    skipped.
//! 3. Entries are validated with `CopyConfig::validate`; the first invalid
//!    entry aborts collection, before any file is touched.
//!
use crate::common::composer::manifest::PackageMetadataProvider;
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::Result;
use crate::core::resolver::CopyConfig;
use serde_json::{Map, Value};
use tracing::debug;

/// Shape-checked settings of one package, entries not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSettings {
    pub package: String,
    pub entries: Vec<Value>,
}

/// A validated copy entry and the package that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRule {
    pub package: String,
    pub config: CopyConfig,
}

/// Collects and shape-checks the settings under `extra.<extra_key>`.
pub fn collect_settings(
    provider: &dyn PackageMetadataProvider,
    extra_key: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<PackageSettings> {
    let mut raw: Vec<(String, Value)> = Vec::new();
    let packages =
        std::iter::once(provider.root_package()).chain(provider.locked_packages().iter());
    for package in packages {
        let Some(settings) = package.extra.get(extra_key) else {
            continue;
        };
        debug!("Found {} settings in {}", extra_key, package.name);
        match raw.iter_mut().find(|(name, _)| *name == package.name) {
            Some(existing) => existing.1 = settings.clone(),
            None => raw.push((package.name.clone(), settings.clone())),
        }
    }

    raw.into_iter()
        .filter_map(|(package, settings)| shape_check(package, settings, extra_key, sink))
        .collect()
}

fn shape_check(
    package: String,
    settings: Value,
    extra_key: &str,
    sink: &dyn DiagnosticSink,
) -> Option<PackageSettings> {
    let items: Vec<Value> = match settings {
        Value::Array(items) => items,
        Value::Object(map) if is_single_entry(&map) => vec![Value::Object(map)],
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => {
            sink.write(&format!(
                "The extra.{} setting must be an array or a configuration object in package {}.",
                extra_key, package
            ));
            return None;
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        if item.is_object() {
            entries.push(item);
        } else {
            sink.write(&format!(
                "The extra.{} structure must be an array of configuration objects in package {}.",
                extra_key, package
            ));
        }
    }

    if entries.is_empty() {
        None
    } else {
        Some(PackageSettings { package, entries })
    }
}

/// `{"source": "...", "target": "..."}` given directly instead of in a list.
fn is_single_entry(map: &Map<String, Value>) -> bool {
    ["source", "target"]
        .iter()
        .any(|key| map.get(*key).is_some_and(Value::is_string))
}

/// Validates every entry; fails on the first invalid one.
pub fn into_rules(settings: Vec<PackageSettings>, verbose: bool) -> Result<Vec<CopyRule>> {
    let mut rules = Vec::new();
    for PackageSettings { package, entries } in settings {
        for entry in &entries {
            let config = CopyConfig::validate(&package, entry, verbose)?;
            rules.push(CopyRule {
                package: package.clone(),
                config,
            });
        }
    }
    Ok(rules)
}
