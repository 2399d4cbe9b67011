//! # Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem building blocks of the copy step.
//!
//! - **`copy`**: The recursive copy engine (`CopyEngine`) and its outcome types.
//! - **`io`**: Directory creation with `0755` permissions and single-file copies.
//! - **`links`**: Symlink replication that preserves the link value.
//! - **`pattern`**: Source glob expansion with brace alternation.
//!
//! ```rust
//! use crate::common::fs::{copy::CopyEngine, io, pattern};
//!
//! # fn run_example(root: &Path, sink: &dyn DiagnosticSink) -> Result<()> {
//! io::ensure_dir_exists(&root.join("public/media"))?;
//! let mut engine = CopyEngine::new(root, false, sink);
//! for source in pattern::expand("/srv/shop/vendor/acme/theme/{css,js}")? {
//!     engine.copy(&source, &root.join("public/media"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Recursive copy engine (`CopyEngine`, `CopyOutcome`, `CopyReport`).
pub mod copy;
/// Directory creation and file copy helpers.
pub mod io;
/// Symlink replication.
pub mod links;
/// Glob and brace expansion of source patterns.
pub mod pattern;
