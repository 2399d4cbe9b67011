//! # composer-file-copy Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by all commands:
//! - `config`: Tool settings (`.file-copy.toml`, user config)
//! - `diagnostics`: The `DiagnosticSink` user-facing lines are written to
//! - `error`: Error types and the `Result` alias
//! - `processor`: Runs copy rules through the copy engine
//! - `resolver`: Validates copy entries and resolves their paths
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{FileCopyError, Result};
//! use crate::core::processor::Processor;
//! ```
//!
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod processor;
pub mod resolver;
