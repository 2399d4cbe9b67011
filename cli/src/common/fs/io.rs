//! # Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the resolver and the copy engine:
//!
//! - **`ensure_dir_exists`**: Creates a directory and all missing ancestors
//!   (`mkdir -p`) with mode `0755` on Unix. Fails if the path exists but is not
//!   a directory.
//! - **`copy_file`**: Copies one regular file over whatever is at the
//!   destination, using `fs_extra` so overwrite behaviour is explicit.
//!
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Permission bits for directories created while resolving a target.
pub const DIR_MODE: u32 = 0o755;

/// Ensures that a directory exists at `path`, creating missing ancestors.
///
/// New directories get `DIR_MODE` on Unix (minus the process umask).
///
/// # Arguments
///
/// * `path` - The directory that must exist afterwards.
///
/// # Returns
///
/// * `Result<()>` - `Ok(())` if the directory exists or was created.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory (`FileCopyError::FileSystem`).
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder
            .create(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(FileCopyError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Copies the regular file `source` to `dest`, replacing an existing file.
///
/// The destination is truncated before the source is read, so callers must
/// not pass the same file twice (`CopyEngine` checks this).
///
/// # Arguments
///
/// * `source` - The regular file to read.
/// * `dest` - The file path to write; its parent directory must exist.
///
/// # Returns
///
/// * `Result<u64>` - The number of bytes written.
///
/// # Errors
///
/// Returns an `Err` if `source` cannot be read or `dest` cannot be written.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;
    fs_extra::file::copy(source, dest, &options)
        .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to copy file {:?} to {:?}", source, dest)))
}
