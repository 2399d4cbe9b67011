//! # Copy Rule Processing
//!
//! File: cli/src/core/processor.rs
//!
//! ## Overview
//!
//! Runs validated copy rules against a Composer project, one after the other.
//! For each rule the processor resolves the source pattern, expands it, makes
//! sure the target exists and hands every match to a `CopyEngine`.
//!
//! ## Architecture
//!
//! 1. `ProjectPaths` are resolved once, when the processor is created.
//! 2. Per rule: pattern -> glob matches. No matches means the rule is reported
//!    (`No source files found: ...`) and its target is left untouched.
//! 3. The target is resolved (created if missing) and each match is copied in
//!    glob order. An I/O error stops the run; soft skips are only counted.
//!
use crate::common::composer::manifest::PackageMetadataProvider;
use crate::common::composer::rules::CopyRule;
use crate::common::fs::copy::{CopyEngine, CopyReport};
use crate::common::fs::pattern;
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::Result;
use crate::core::resolver::{resolve_source_pattern, resolve_target_path, ProjectPaths};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of processing one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub package: String,
    pub pattern: PathBuf,
    /// `None` when the pattern matched nothing and the target was not resolved.
    pub target: Option<PathBuf>,
    pub matches: usize,
    pub copy: CopyReport,
}

pub struct Processor<'a> {
    provider: &'a dyn PackageMetadataProvider,
    sink: &'a dyn DiagnosticSink,
    paths: ProjectPaths,
}

impl<'a> Processor<'a> {
    pub fn new(
        provider: &'a dyn PackageMetadataProvider,
        sink: &'a dyn DiagnosticSink,
        root_override_key: &str,
    ) -> Result<Self> {
        let paths = ProjectPaths::resolve(
            provider.vendor_dir(),
            &provider.root_package().extra,
            root_override_key,
        )?;
        debug!(
            "Project root {} (override: {})",
            paths.project_root().display(),
            paths.root_override().unwrap_or("none")
        );
        Ok(Self {
            provider,
            sink,
            paths,
        })
    }

    #[cfg(test)]
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Processes all rules in order and returns one report per rule.
    pub fn process_all(&self, rules: &[CopyRule]) -> Result<Vec<RuleReport>> {
        let mut reports = Vec::with_capacity(rules.len());
        for rule in rules {
            let report = self
                .process_copy(rule)
                .with_context(|| format!("Copy rule of package {} failed", rule.package))?;
            reports.push(report);
        }
        Ok(reports)
    }

    pub fn process_copy(&self, rule: &CopyRule) -> Result<RuleReport> {
        let config = &rule.config;
        let pattern = resolve_source_pattern(
            config,
            self.provider.vendor_dir(),
            &rule.package,
            &self.provider.root_package().name,
            &self.paths,
        );
        let pattern_text = pattern.to_string_lossy().into_owned();
        debug!("Rule of {} expands {}", rule.package, pattern_text);

        let sources = pattern::expand(&pattern_text)?;
        if sources.is_empty() {
            self.sink
                .write(&format!("No source files found: {}", pattern_text));
            return Ok(RuleReport {
                package: rule.package.clone(),
                pattern,
                target: None,
                matches: 0,
                copy: CopyReport::default(),
            });
        }

        let target = resolve_target_path(config, &self.paths)?;
        if config.debug {
            self.sink.write(&format!("Source: {}", pattern_text));
            self.sink.write(&format!("Target: {}", target.display()));
        }

        let project_root = self.paths.project_root();
        let mut engine = CopyEngine::new(&project_root, config.debug, self.sink);
        for source in &sources {
            engine.copy(source, &target)?;
        }

        let copy = engine.report();
        info!(
            "{}: {} file(s), {} symlink(s), {} folder(s) created, {} skipped",
            rule.package,
            copy.files,
            copy.symlinks,
            copy.directories,
            copy.skipped()
        );
        Ok(RuleReport {
            package: rule.package.clone(),
            pattern,
            target: Some(target),
            matches: sources.len(),
            copy,
        })
    }
}
