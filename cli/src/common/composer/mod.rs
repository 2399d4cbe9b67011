//! # Composer Project Access (`common::composer`)
//!
//! File: cli/src/common/composer/mod.rs
//!
//! ## Overview
//!
//! Everything that knows about Composer's file formats lives here:
//!
//! - **`manifest`**: Loads `composer.json` / `composer.lock` and exposes them
//!   through the `PackageMetadataProvider` trait.
//! - **`rules`**: Collects and shape-checks the `extra.file-copy` settings of
//!   all packages and turns them into validated copy rules.
//!

/// Manifest and lock file loading (`ComposerProject`, `PackageMetadataProvider`).
pub mod manifest;
/// Collection of `extra.file-copy` settings into copy rules.
pub mod rules;
