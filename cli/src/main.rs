//! # composer-file-copy Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the composer-file-copy CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each command (`run`, `copy`, `list`) is a variant of the `Commands` enum
//!   and has a handler in `commands::<name>`
//! - `-v` doubles as Composer's verbose mode: any `-v` forces debug output on
//!   every copy rule, more `-v`s raise the log level
//! - All errors are propagated to this level and reported once
//!
//! ## Examples
//!
//! ```bash
//! # Wire into composer.json:
//! #   "scripts": { "post-install-cmd": ["composer-file-copy run"] }
//! composer-file-copy run
//!
//! # Inspect the rules of another project with debug output
//! composer-file-copy -v -d /srv/shop list
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "composer-file-copy",
    about = "Copies files out of installed Composer packages as declared in extra.file-copy",
    long_about = "Runs the post-install / post-update file copy step of a Composer project.\n\
                  Rules are read from extra.file-copy of the root package and of every locked package.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose mode: forces debug output on every rule (-vv, -vvv for more logs).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project directory containing composer.json.
    #[arg(
        short = 'd',
        long,
        global = true,
        env = "COMPOSER_FILE_COPY_WORKING_DIR",
        default_value = "."
    )]
    working_dir: PathBuf,
}

/// All available commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Process every extra.file-copy rule (post-install / post-update step).
    Run(commands::run::RunArgs),
    /// Process a single rule given on the command line.
    Copy(commands::copy::CopyArgs),
    /// List the rules `run` would process.
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 | 1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = build_context(&cli).and_then(|ctx| match cli.command {
        Commands::Run(args) => commands::run::handle_run(args, &ctx),
        Commands::Copy(args) => commands::copy::handle_copy(args, &ctx),
        Commands::List(args) => commands::list::handle_list(args, &ctx),
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

/// Configuration errors exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    let is_configuration = err.chain().any(|cause| {
        cause
            .downcast_ref::<crate::core::error::FileCopyError>()
            .is_some_and(crate::core::error::FileCopyError::is_configuration)
    });
    if is_configuration {
        2
    } else {
        1
    }
}

fn build_context(cli: &Cli) -> anyhow::Result<commands::Context> {
    use anyhow::Context as _;
    let working_dir = cli.working_dir.canonicalize().with_context(|| {
        format!(
            "Working directory {} does not exist",
            cli.working_dir.display()
        )
    })?;
    Ok(commands::Context {
        working_dir,
        verbose: cli.verbose > 0,
    })
}
