//! # List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! `composer-file-copy list` shows the copy rules `run` would process, in the
//! order it would process them, without touching the filesystem. Rules are
//! validated the same way `run` validates them, so a broken entry fails here
//! too.
//!
//! Example output:
//!
//! ```text
//! Copy rules from extra.file-copy:
//!
//! Package      | Source              | Target      | Debug
//! -------------+---------------------+-------------+------
//! acme/shop    | /deploy/robots.txt  | pub         | no
//! acme/theme   | /public/{css,js}    | pub/static  | yes
//!
//! Found 2 rule(s).
//! ```
//!
use crate::commands::Context;
use crate::common::composer::rules::{collect_settings, into_rules, CopyRule};
use crate::core::diagnostics::ConsoleSink;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `composer-file-copy list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Include rules of packages from `packages-dev` in the lock file.
    #[arg(long)]
    pub dev: bool,
}

pub fn handle_list(args: ListArgs, ctx: &Context) -> Result<()> {
    info!("Listing copy rules in {}", ctx.working_dir.display());
    let settings = ctx.settings()?;
    let project = ctx.load_project(&settings, args.dev)?;
    let sink = ConsoleSink;

    let collected = collect_settings(&project, &settings.extra_key, &sink);
    let rules = into_rules(collected, ctx.verbose)?;
    for line in render_table(&rules, &settings.extra_key) {
        println!("{}", line);
    }
    Ok(())
}

fn render_table(rules: &[CopyRule], extra_key: &str) -> Vec<String> {
    if rules.is_empty() {
        return vec![format!("No copy rules found in extra.{}.", extra_key)];
    }

    let pkg_w = column_width(rules.iter().map(|r| r.package.len()), "Package");
    let src_w = column_width(rules.iter().map(|r| r.config.source.len()), "Source");
    let tgt_w = column_width(rules.iter().map(|r| r.config.target.len()), "Target");

    let mut lines = vec![
        format!("Copy rules from extra.{}:", extra_key),
        String::new(),
        format!(
            "{:<pkg_w$} | {:<src_w$} | {:<tgt_w$} | Debug",
            "Package", "Source", "Target"
        ),
        format!("{:-<pkg_w$}-+-{:-<src_w$}-+-{:-<tgt_w$}-+------", "", "", ""),
    ];
    for rule in rules {
        lines.push(format!(
            "{:<pkg_w$} | {:<src_w$} | {:<tgt_w$} | {}",
            rule.package,
            rule.config.source,
            rule.config.target,
            if rule.config.debug { "yes" } else { "no" }
        ));
    }
    lines.push(String::new());
    lines.push(format!("Found {} rule(s).", rules.len()));
    lines
}

/// Widest value or header, capped at 40 columns.
fn column_width(lengths: impl Iterator<Item = usize>, header: &str) -> usize {
    lengths.max().unwrap_or(0).max(header.len()).min(40)
}
