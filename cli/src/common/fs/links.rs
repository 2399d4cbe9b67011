//! # Symlink Replication
//!
//! File: cli/src/common/fs/links.rs
//!
//! ## Overview
//!
//! The copy engine never dereferences symlinks: a link found in a source tree
//! is recreated at the destination with exactly the same link value, whether
//! that value is relative, absolute or dangling.
//!
//! ## Architecture
//!
//! `replicate_symlink` handles an occupied destination the way a re-run of the
//! copy needs it to:
//! - a symlink with the identical link value is left alone (already linked);
//! - anything else at the destination is an error, nothing is overwritten.
//!
//! On Windows the link flavour (file or directory) is chosen by resolving the
//! link value relative to the destination's parent.
//!
use crate::common::fs::copy::CopyOutcome;
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, info};

/// Creates a symlink at `dest` whose link value is `link_value`.
///
/// # Arguments
///
/// * `link_value` - The value read from the source link, copied verbatim.
/// * `dest` - Where the new link is created.
///
/// # Returns
///
/// * `Result<CopyOutcome>` - `Copied` for a new link, `SkippedAlreadyLinked`
///   if `dest` already is a link with the same value.
///
/// # Errors
///
/// Returns an `Err` if:
/// - Something else already exists at `dest`.
/// - Creating the link fails, or the platform has no symlinks.
pub fn replicate_symlink(link_value: &Path, dest: &Path) -> Result<CopyOutcome> {
    if dest.symlink_metadata().is_ok() {
        if let Ok(existing) = std::fs::read_link(dest) {
            if existing == link_value {
                debug!("Symlink {:?} already points to {:?}", dest, link_value);
                return Ok(CopyOutcome::SkippedAlreadyLinked);
            }
        }
        anyhow::bail!(FileCopyError::FileSystem(format!(
            "Cannot create symlink {:?}: destination already exists",
            dest
        )));
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(link_value, dest).with_context(|| {
            format!("Failed to create symlink {:?} -> {:?}", dest, link_value)
        })?;
    }
    #[cfg(windows)]
    {
        let resolved = dest
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(link_value);
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(link_value, dest)
        } else {
            std::os::windows::fs::symlink_file(link_value, dest)
        }
        .with_context(|| format!("Failed to create symlink {:?} -> {:?}", dest, link_value))?;
    }
    #[cfg(not(any(unix, windows)))]
    {
        anyhow::bail!("Symlink creation not implemented for this platform.");
    }

    info!("Created symlink: {:?} -> {:?}", dest, link_value);
    Ok(CopyOutcome::Copied)
}
