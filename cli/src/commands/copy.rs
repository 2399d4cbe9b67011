//! # Copy Command
//!
//! File: cli/src/commands/copy.rs
//!
//! ## Overview
//!
//! `composer-file-copy copy` processes one rule given on the command line,
//! exactly as if it had been declared in `extra.file-copy` of `--package`
//! (the root package by default). Handy for trying a rule before committing
//! it to a manifest.
//!
//! ```bash
//! composer-file-copy copy --source "/public/{css,js}" --target pub/static --package acme/theme --debug
//! ```
//!
use crate::commands::run::summary_line;
use crate::commands::Context;
use crate::common::composer::manifest::PackageMetadataProvider;
use crate::common::composer::rules::CopyRule;
use crate::core::diagnostics::{ConsoleSink, DiagnosticSink};
use crate::core::error::Result;
use crate::core::processor::Processor;
use crate::core::resolver::CopyConfig;
use clap::Parser;
use serde_json::json;
use tracing::info;

/// Arguments for `composer-file-copy copy`.
#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Source glob; `/path` is relative to the declaring package.
    #[arg(short, long)]
    pub source: String,

    /// Target directory; relative paths are inside the project root.
    #[arg(short, long)]
    pub target: String,

    /// Package the rule is declared by (defaults to the root package).
    #[arg(short, long)]
    pub package: Option<String>,

    /// Print every copied path.
    #[arg(long)]
    pub debug: bool,
}

pub fn handle_copy(args: CopyArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let project = ctx.load_project(&settings, false)?;
    let package = args
        .package
        .unwrap_or_else(|| project.root_package().name.clone());
    info!("Copying {} -> {} for {}", args.source, args.target, package);

    let raw = json!({
        "source": args.source,
        "target": args.target,
        "debug": args.debug,
    });
    let rule = CopyRule {
        config: CopyConfig::validate(&package, &raw, ctx.verbose)?,
        package,
    };

    let sink = ConsoleSink;
    let processor = Processor::new(&project, &sink, &settings.root_override_key)?;
    let report = processor.process_copy(&rule)?;
    if rule.config.debug {
        sink.write(&summary_line(&report, &ctx.working_dir));
    }
    Ok(())
}
