//! # Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers:
//!
//! - **`composer`**: Reading `composer.json` / `composer.lock` and collecting
//!   the `extra.file-copy` rules they declare.
//! - **`fs`**: The recursive copy engine plus the filesystem helpers it is built
//!   on (directory creation, symlink replication, glob expansion).
//!

/// Composer manifest access and copy rule collection.
pub mod composer;
/// Filesystem operations (copy engine, I/O, links, patterns).
pub mod fs;
