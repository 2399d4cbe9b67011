//! # Recursive Copy Engine
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Replicates one source path (a file, a directory tree or a symlink) into a
//! target directory. This is the heart of composer-file-copy: every rule's
//! glob matches are fed through `CopyEngine::copy` one by one.
//!
//! ## Architecture
//!
//! For each visited path the engine:
//! 1. Makes a relative source absolute against the project root.
//! 2. Canonicalizes the source's parent and re-attaches the final component, so
//!    a symlink is still seen as a symlink. A missing source is a soft skip.
//! 3. Skips a directory (or a link resolving to one) that already *is* the
//!    target, and a file whose destination is the file itself.
//! 4. Classifies the entry (`FilesystemEntry`) and dispatches:
//!    - **Symlink**: recreated with the same link value (`links`).
//!    - **Directory**: created if needed, then every entry is visited in the
//!      order the filesystem returns them.
//!    - **Regular file**: copied with contents and permissions (`io`).
//!
//! A source that sits directly in the project root keeps its own name under
//! the target (`public/` copied into `pub` becomes `pub/public/`) instead of
//! being flattened into it. Files and links are also placed under their own
//! name when the target is an existing directory.
//!
//! Recursion depth is capped at `MAX_DEPTH`, and the run's own target is never
//! used as a source, so copying a tree into one of its subdirectories ends.
//!
//! ## Usage
//!
//! ```rust
//! let mut engine = CopyEngine::new(&project_root, debug, &sink);
//! for source in pattern::expand(&source_pattern)? {
//!     engine.copy(&source, &target)?;
//! }
//! let report = engine.report();
//! ```
//!
use crate::common::fs::{io, links};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{FileCopyError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Deepest directory nesting the engine will descend into.
pub const MAX_DEPTH: usize = 256;

/// What happened to a single source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Source and destination are the same directory or file.
    SkippedIdentical,
    /// Source does not exist (anymore).
    SkippedMissing,
    /// The destination already is a symlink with the same link value.
    SkippedAlreadyLinked,
    /// Sockets, FIFOs and device nodes are never copied.
    SkippedUnsupported,
}

/// Classification of a path at the moment it is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesystemEntry {
    Symlink,
    Directory,
    RegularFile,
    Special,
    Missing,
}

impl FilesystemEntry {
    /// Classifies `path` without following a final symlink.
    pub fn of(path: &Path) -> Self {
        match path.symlink_metadata() {
            Ok(meta) if meta.file_type().is_symlink() => Self::Symlink,
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(meta) if meta.is_file() => Self::RegularFile,
            Ok(_) => Self::Special,
            Err(_) => Self::Missing,
        }
    }
}

/// Counters for everything one engine has done.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub directories: usize,
    pub symlinks: usize,
    pub skipped_missing: usize,
    pub skipped_identical: usize,
    pub skipped_linked: usize,
    pub skipped_unsupported: usize,
}

impl CopyReport {
    fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => {}
            CopyOutcome::SkippedIdentical => self.skipped_identical += 1,
            CopyOutcome::SkippedMissing => self.skipped_missing += 1,
            CopyOutcome::SkippedAlreadyLinked => self.skipped_linked += 1,
            CopyOutcome::SkippedUnsupported => self.skipped_unsupported += 1,
        }
    }

    pub fn merge(&mut self, other: &CopyReport) {
        self.files += other.files;
        self.directories += other.directories;
        self.symlinks += other.symlinks;
        self.skipped_missing += other.skipped_missing;
        self.skipped_identical += other.skipped_identical;
        self.skipped_linked += other.skipped_linked;
        self.skipped_unsupported += other.skipped_unsupported;
    }

    pub fn skipped(&self) -> usize {
        self.skipped_missing + self.skipped_identical + self.skipped_linked + self.skipped_unsupported
    }
}

/// Depth-first copier bound to one project root and one diagnostic sink.
pub struct CopyEngine<'a> {
    project_root: PathBuf,
    debug: bool,
    sink: &'a dyn DiagnosticSink,
    guard: Option<PathBuf>,
    report: CopyReport,
}

impl<'a> CopyEngine<'a> {
    /// `project_root` is the directory relative sources are resolved against
    /// and whose direct children keep their name under the target.
    pub fn new(project_root: &Path, debug: bool, sink: &'a dyn DiagnosticSink) -> Self {
        let project_root = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());
        Self {
            project_root,
            debug,
            sink,
            guard: None,
            report: CopyReport::default(),
        }
    }

    pub fn report(&self) -> CopyReport {
        self.report
    }

    /// Copies `source` into `target`; `target` is the top-level destination of
    /// this run.
    ///
    /// # Arguments
    ///
    /// * `source` - A glob match; relative paths are taken from the project root.
    /// * `target` - The resolved target of the rule.
    ///
    /// # Returns
    ///
    /// * `Result<CopyOutcome>` - What happened to `source` itself. Counters for
    ///   everything below it are in `report()`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` on the first I/O failure, on a conflicting entry at a
    /// symlink destination, or when nesting exceeds `MAX_DEPTH`.
    pub fn copy(&mut self, source: &Path, target: &Path) -> Result<CopyOutcome> {
        self.guard = target.canonicalize().ok();
        let outcome = self.copy_recursive(source, target, 0)?;
        Ok(outcome)
    }

    fn say(&self, line: String) {
        if self.debug {
            self.sink.write(&line);
        }
    }

    fn copy_recursive(&mut self, source: &Path, target: &Path, depth: usize) -> Result<CopyOutcome> {
        if depth > MAX_DEPTH {
            anyhow::bail!(FileCopyError::DepthExceeded {
                limit: MAX_DEPTH,
                path: source.to_path_buf(),
            });
        }

        let source = if source.is_absolute() {
            source.to_path_buf()
        } else {
            self.project_root.join(source)
        };

        let Some(source) = normalize(&source) else {
            self.say(format!(
                "No copy : source ({}) does not exist",
                source.display()
            ));
            return Ok(self.finish(CopyOutcome::SkippedMissing));
        };

        let kind = FilesystemEntry::of(&source);
        if matches!(kind, FilesystemEntry::Directory | FilesystemEntry::Symlink) {
            // Links are compared by what they resolve to.
            let resolved = source.canonicalize().ok().filter(|p| p.is_dir());
            if resolved.is_some() && resolved == target.canonicalize().ok() {
                self.say(format!(
                    "No copy : source ({}) and target ({}) are identical",
                    source.display(),
                    target.display()
                ));
                return Ok(self.finish(CopyOutcome::SkippedIdentical));
            }
        }
        if kind == FilesystemEntry::Directory
            && depth > 0
            && self.guard.as_deref() == Some(source.as_path())
        {
            self.say(format!(
                "No copy : source ({}) is the destination of this copy",
                source.display()
            ));
            return Ok(self.finish(CopyOutcome::SkippedIdentical));
        }

        trace!("Visiting {:?} as {:?}", source, kind);
        let outcome = match kind {
            FilesystemEntry::Symlink => self.copy_symlink(&source, target)?,
            FilesystemEntry::Directory => self.copy_directory(&source, target, depth)?,
            FilesystemEntry::RegularFile => self.copy_file(&source, target)?,
            FilesystemEntry::Special => {
                self.say(format!(
                    "No copy : source ({}) is not a regular file, directory or symlink",
                    source.display()
                ));
                CopyOutcome::SkippedUnsupported
            }
            // Vanished between normalization and classification.
            FilesystemEntry::Missing => CopyOutcome::SkippedMissing,
        };
        Ok(self.finish(outcome))
    }

    fn finish(&mut self, outcome: CopyOutcome) -> CopyOutcome {
        self.report.record(outcome);
        outcome
    }

    fn copy_symlink(&mut self, source: &Path, target: &Path) -> Result<CopyOutcome> {
        self.say(format!(
            "Copying Symlink {} to {}",
            source.display(),
            target.display()
        ));
        let link_value = fs::read_link(source)
            .with_context(|| format!("Failed to read symlink {:?}", source))?;

        // A symlink already sitting at `target` is the destination itself, not
        // a directory to place the link into.
        let target_is_dir = target
            .symlink_metadata()
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        let dest = self.placement(source, target, target_is_dir);

        let outcome = links::replicate_symlink(&link_value, &dest)?;
        if outcome == CopyOutcome::Copied {
            self.report.symlinks += 1;
        }
        Ok(outcome)
    }

    fn copy_directory(&mut self, source: &Path, target: &Path, depth: usize) -> Result<CopyOutcome> {
        let target = match source.file_name() {
            Some(name) if self.is_direct_child(source) => target.join(name),
            _ => target.to_path_buf(),
        };

        if !target.is_dir() {
            self.say(format!("New Folder {}", target.display()));
            fs::create_dir(&target)
                .with_context(|| format!("Failed to create directory {:?}", target))?;
            self.report.directories += 1;
        }

        self.say(format!("Scanning Folder {}", source.display()));
        let entries = fs::read_dir(source)
            .with_context(|| format!("Failed to read directory {:?}", source))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read an entry of {:?}", source))?;
            let name = entry.file_name();
            self.copy_recursive(&source.join(&name), &target.join(&name), depth + 1)?;
        }
        Ok(CopyOutcome::Copied)
    }

    fn copy_file(&mut self, source: &Path, target: &Path) -> Result<CopyOutcome> {
        let dest = self.placement(source, target, target.is_dir());
        if same_file(source, &dest) {
            self.say(format!(
                "No copy : source ({}) and target ({}) are identical",
                source.display(),
                dest.display()
            ));
            return Ok(CopyOutcome::SkippedIdentical);
        }
        self.say(format!(
            "Copying File {} to {}",
            source.display(),
            dest.display()
        ));
        let bytes = io::copy_file(source, &dest)?;
        debug!("Copied {} bytes to {:?}", bytes, dest);
        self.report.files += 1;
        Ok(CopyOutcome::Copied)
    }

    /// Destination for a file or link: under its own name when the source is a
    /// direct child of the project root or the target is a directory.
    fn placement(&self, source: &Path, target: &Path, target_is_dir: bool) -> PathBuf {
        match source.file_name() {
            Some(name) if self.is_direct_child(source) || target_is_dir => target.join(name),
            _ => target.to_path_buf(),
        }
    }

    fn is_direct_child(&self, source: &Path) -> bool {
        source.parent() == Some(self.project_root.as_path())
    }
}

/// True when `dest` already is `source` (same path, a link to it or a hard
/// link). Copying in that case would truncate the source.
fn same_file(source: &Path, dest: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(source), fs::metadata(dest)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (source.canonicalize(), dest.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Resolves every component except the last one, so the final entry keeps its
/// own identity (a symlink stays a symlink). Returns `None` if nothing exists
/// at the resulting path.
fn normalize(path: &Path) -> Option<PathBuf> {
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            parent.canonicalize().ok()?.join(name)
        }
        _ => path.canonicalize().ok()?,
    };
    resolved.symlink_metadata().ok()?;
    Some(resolved)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::MemorySink;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_direct_child_directory_keeps_its_name() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("A/f.txt"), "f");
        write(&root.join("A/sub/g.txt"), "g");
        fs::create_dir(root.join("B"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        assert_eq!(engine.copy(&root.join("A"), &root.join("B"))?, CopyOutcome::Copied);

        assert_eq!(fs::read_to_string(root.join("B/A/f.txt"))?, "f");
        assert_eq!(fs::read_to_string(root.join("B/A/sub/g.txt"))?, "g");
        let report = engine.report();
        assert_eq!(report.files, 2);
        assert_eq!(report.directories, 2);
        assert!(sink.lines().is_empty(), "debug off means no output");
        Ok(())
    }

    #[test]
    fn test_nested_directory_is_merged_into_target() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/acme/theme/public/css/app.css"), "css");
        fs::create_dir(root.join("web"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        engine.copy(&root.join("vendor/acme/theme/public/"), &root.join("web"))?;

        assert_eq!(fs::read_to_string(root.join("web/css/app.css"))?, "css");
        assert!(sink.contains("Scanning Folder"));
        assert!(sink.contains("New Folder"));
        Ok(())
    }

    #[test]
    fn test_file_into_existing_directory_uses_basename() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/pkg/conf/app.ini"), "ini");
        fs::create_dir(root.join("etc"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        engine.copy(&root.join("vendor/pkg/conf/app.ini"), &root.join("etc"))?;
        assert_eq!(fs::read_to_string(root.join("etc/app.ini"))?, "ini");
        assert!(sink.contains("Copying File"));
        Ok(())
    }

    #[test]
    fn test_file_to_non_directory_target_is_written_exactly() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/pkg/conf/app.ini"), "ini");
        fs::create_dir(root.join("etc"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        let dest = root.join("etc/renamed.ini");
        engine.copy(&root.join("vendor/pkg/conf/app.ini"), &dest)?;
        assert_eq!(fs::read_to_string(&dest)?, "ini");
        Ok(())
    }

    #[test]
    fn test_direct_child_file_keeps_its_name() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join(".htaccess"), "deny");
        fs::create_dir(root.join("pub"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        engine.copy(&root.join(".htaccess"), &root.join("pub"))?;
        assert_eq!(fs::read_to_string(root.join("pub/.htaccess"))?, "deny");

        // A direct child always goes under the target, so a missing target
        // directory surfaces as an I/O error instead of a rename.
        let err = engine
            .copy(&root.join(".htaccess"), &root.join("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to copy file"));
        assert!(!root.join("missing").exists());
        Ok(())
    }

    #[test]
    fn test_missing_source_is_soft_skip() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        let outcome = engine.copy(&root.join("nope"), &root)?;
        assert_eq!(outcome, CopyOutcome::SkippedMissing);
        assert!(sink.contains("does not exist"));
        assert_eq!(engine.report().skipped_missing, 1);
        Ok(())
    }

    #[test]
    fn test_identical_source_and_target_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        fs::create_dir(root.join("same"))?;
        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        let outcome = engine.copy(&root.join("same/"), &root.join("same"))?;
        assert_eq!(outcome, CopyOutcome::SkippedIdentical);
        assert!(sink.contains("are identical"));
        Ok(())
    }

    #[test]
    fn test_relative_source_resolves_against_project_root() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("lib/x.txt"), "x");
        fs::create_dir(root.join("out"))?;
        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        engine.copy(Path::new("lib/x.txt"), &root.join("out"))?;
        assert_eq!(fs::read_to_string(root.join("out/x.txt"))?, "x");
        Ok(())
    }

    #[test]
    fn test_copy_into_own_subdirectory_terminates() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("site/index.html"), "<html>");
        let target = root.join("site/mirror");
        fs::create_dir(&target)?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        engine.copy(&root.join("site/"), &target)?;
        // `site` is a direct child of the root, so it lands under `mirror/site`.
        assert_eq!(
            fs::read_to_string(target.join("site/index.html"))?,
            "<html>"
        );
        assert!(engine.report().skipped_identical >= 1);
        Ok(())
    }

    #[test]
    fn test_copy_is_idempotent_for_files() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/p/a/one.txt"), "1");
        fs::create_dir(root.join("dst"))?;
        let sink = MemorySink::default();
        for _ in 0..2 {
            let mut engine = CopyEngine::new(&root, false, &sink);
            engine.copy(&root.join("vendor/p/a"), &root.join("dst"))?;
        }
        assert_eq!(fs::read_to_string(root.join("dst/one.txt"))?, "1");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_recreated_not_dereferenced() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/p/real.txt"), "real");
        std::os::unix::fs::symlink("real.txt", root.join("vendor/p/alias.txt"))?;
        fs::create_dir(root.join("dst"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        engine.copy(&root.join("vendor/p/alias.txt"), &root.join("dst"))?;

        let created = root.join("dst/alias.txt");
        assert!(created.symlink_metadata()?.file_type().is_symlink());
        assert_eq!(fs::read_link(&created)?, Path::new("real.txt"));
        assert!(sink.contains("Copying Symlink"));
        assert_eq!(engine.report().symlinks, 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_inside_tree_survive_a_second_run() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/p/tree/data/file.txt"), "d");
        std::os::unix::fs::symlink("data", root.join("vendor/p/tree/current"))?;
        fs::create_dir(root.join("dst"))?;

        let sink = MemorySink::default();
        let mut first = CopyEngine::new(&root, false, &sink);
        first.copy(&root.join("vendor/p/tree"), &root.join("dst"))?;
        assert_eq!(fs::read_link(root.join("dst/current"))?, Path::new("data"));

        let mut second = CopyEngine::new(&root, false, &sink);
        second.copy(&root.join("vendor/p/tree"), &root.join("dst"))?;
        assert_eq!(second.report().skipped_linked, 1);
        assert_eq!(fs::read_link(root.join("dst/current"))?, Path::new("data"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_still_copied() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        fs::create_dir_all(root.join("vendor/p"))?;
        std::os::unix::fs::symlink("/does/not/exist", root.join("vendor/p/broken"))?;
        fs::create_dir(root.join("dst"))?;
        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        engine.copy(&root.join("vendor/p/broken"), &root.join("dst"))?;
        assert_eq!(
            fs::read_link(root.join("dst/broken"))?,
            Path::new("/does/not/exist")
        );
        Ok(())
    }

    #[test]
    fn test_file_copied_onto_itself_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("pub/index.php"), "precious");

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        let outcome = engine.copy(&root.join("pub/index.php"), &root.join("pub"))?;

        assert_eq!(outcome, CopyOutcome::SkippedIdentical);
        assert_eq!(fs::read_to_string(root.join("pub/index.php"))?, "precious");
        assert_eq!(engine.report().files, 0);
        assert_eq!(engine.report().skipped_identical, 1);
        assert!(sink.contains("are identical"));
        assert!(!sink.contains("Copying File"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_linked_destination_is_not_truncated() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/p/data.csv"), "id,name");
        fs::create_dir(root.join("dst"))?;
        fs::hard_link(root.join("vendor/p/data.csv"), root.join("dst/data.csv"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        let outcome = engine.copy(&root.join("vendor/p/data.csv"), &root.join("dst"))?;
        assert_eq!(outcome, CopyOutcome::SkippedIdentical);
        assert_eq!(fs::read_to_string(root.join("vendor/p/data.csv"))?, "id,name");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_resolving_to_target_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        fs::create_dir_all(root.join("vendor/p"))?;
        fs::create_dir(root.join("pub"))?;
        std::os::unix::fs::symlink(root.join("pub"), root.join("vendor/p/pub-link"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        let outcome = engine.copy(&root.join("vendor/p/pub-link/"), &root.join("pub"))?;

        assert_eq!(outcome, CopyOutcome::SkippedIdentical);
        assert!(root.join("pub/pub-link").symlink_metadata().is_err());
        assert_eq!(engine.report().symlinks, 0);
        assert!(sink.contains("are identical"));
        Ok(())
    }

    #[test]
    fn test_depth_limit_is_enforced() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        let mut deepest = root.join("vendor/p/d");
        for _ in 0..=MAX_DEPTH {
            deepest.push("d");
        }
        fs::create_dir_all(&deepest)?;
        fs::create_dir(root.join("dst"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, false, &sink);
        let err = engine
            .copy(&root.join("vendor/p/d"), &root.join("dst"))
            .unwrap_err();
        assert!(err.chain().any(|cause| matches!(
            cause.downcast_ref::<FileCopyError>(),
            Some(FileCopyError::DepthExceeded { limit: MAX_DEPTH, .. })
        )));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_socket_is_skipped_as_unsupported() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        write(&root.join("vendor/p/run/readme.txt"), "r");
        let socket = root.join("vendor/p/run/app.sock");
        let _listener = std::os::unix::net::UnixListener::bind(&socket)?;
        assert_eq!(FilesystemEntry::of(&socket), FilesystemEntry::Special);
        fs::create_dir(root.join("dst"))?;

        let sink = MemorySink::default();
        let mut engine = CopyEngine::new(&root, true, &sink);
        engine.copy(&root.join("vendor/p/run"), &root.join("dst"))?;

        let report = engine.report();
        assert_eq!(report.files, 1);
        assert_eq!(report.skipped_unsupported, 1);
        assert!(root.join("dst/app.sock").symlink_metadata().is_err());
        assert!(sink.contains("is not a regular file, directory or symlink"));
        Ok(())
    }

    #[test]
    fn test_classification() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("f");
        fs::write(&file, "")?;
        assert_eq!(FilesystemEntry::of(dir.path()), FilesystemEntry::Directory);
        assert_eq!(FilesystemEntry::of(&file), FilesystemEntry::RegularFile);
        assert_eq!(
            FilesystemEntry::of(&dir.path().join("missing")),
            FilesystemEntry::Missing
        );
        Ok(())
    }

    #[test]
    fn test_report_merge() {
        let mut total = CopyReport::default();
        let part = CopyReport {
            files: 2,
            symlinks: 1,
            skipped_missing: 1,
            ..CopyReport::default()
        };
        total.merge(&part);
        total.merge(&part);
        assert_eq!(total.files, 4);
        assert_eq!(total.symlinks, 2);
        assert_eq!(total.skipped(), 2);
    }
}
