//! # Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! `composer-file-copy run` is the post-install / post-update step: it
//! collects the `extra.file-copy` rules of the root package and of every
//! locked package and processes them in order.
//!
//! ## Architecture
//!
//! 1. Load settings and the Composer project (`composer.json`, `composer.lock`)
//! 2. Collect and shape-check the rules; report packages with broken settings
//! 3. Validate every rule before anything is copied
//! 4. Process the rules sequentially; the first error aborts the run
//!
//! ```bash
//! composer-file-copy run
//! composer-file-copy -v run --event post-update-cmd --dev
//! ```
//!
use crate::commands::Context;
use crate::common::composer::rules::{collect_settings, into_rules};
use crate::common::fs::copy::CopyReport;
use crate::core::diagnostics::{ConsoleSink, DiagnosticSink};
use crate::core::error::Result;
use crate::core::processor::{Processor, RuleReport};
use clap::{Parser, ValueEnum};
use std::path::Path;
use tracing::info;

/// Composer script events the copy step is attached to.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    #[value(name = "post-install-cmd")]
    PostInstall,
    #[value(name = "post-update-cmd")]
    PostUpdate,
}

/// Arguments for `composer-file-copy run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Also process rules of packages from `packages-dev` in the lock file.
    #[arg(long)]
    pub dev: bool,

    /// Composer event that triggered the run (informational).
    #[arg(long, value_enum, default_value = "post-install-cmd")]
    pub event: HookEvent,
}

pub fn handle_run(args: RunArgs, ctx: &Context) -> Result<()> {
    info!("Handling {:?} in {}", args.event, ctx.working_dir.display());

    let settings = ctx.settings()?;
    let project = ctx.load_project(&settings, args.dev)?;
    let sink = ConsoleSink;

    let collected = collect_settings(&project, &settings.extra_key, &sink);
    if collected.is_empty() {
        sink.write(&format!(
            "The parameter handler needs to be configured through the extra.{} settings.",
            settings.extra_key
        ));
        return Ok(());
    }

    let rules = into_rules(collected, ctx.verbose)?;
    let processor = Processor::new(&project, &sink, &settings.root_override_key)?;
    let reports = processor.process_all(&rules)?;

    if ctx.verbose {
        for report in &reports {
            sink.write(&summary_line(report, &ctx.working_dir));
        }
    }
    let mut total = CopyReport::default();
    for report in &reports {
        total.merge(&report.copy);
    }
    info!(
        "Processed {} copy rule(s): {} file(s), {} symlink(s), {} skipped",
        reports.len(),
        total.files,
        total.symlinks,
        total.skipped()
    );
    Ok(())
}

/// One line per rule: package, counters and the target relative to the project.
pub fn summary_line(report: &RuleReport, working_dir: &Path) -> String {
    let Some(target) = &report.target else {
        return format!(
            "{}: no source files found for {}",
            report.package,
            report.pattern.display()
        );
    };
    let shown = pathdiff::diff_paths(target, working_dir)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| target.clone());
    format!(
        "{}: {} match(es), {} file(s), {} symlink(s), {} folder(s) created, {} skipped -> {}",
        report.package,
        report.matches,
        report.copy.files,
        report.copy.symlinks,
        report.copy.directories,
        report.copy.skipped(),
        shown.display()
    )
}
