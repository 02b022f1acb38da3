//! Shared symlink utilities for linking dependency caches into worktrees.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::environment::{BootstrapResult, Strategy};
use crate::error::{Error, Result};
use crate::progress::{emit, ProgressReporter};

/// What to do when the source checkout has no cache directory to link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCache {
    /// The cache is required for further work; bootstrap fails.
    Fail,
    /// A missing cache is normal for this ecosystem; bootstrap succeeds without linking.
    Skip,
}

/// Returns `true` if `path` itself is a symlink (the link is not followed).
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Removes whatever currently occupies `path`: a symlink, a file, or a directory tree.
///
/// A missing path is not an error.
pub fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() || meta.is_file() => remove_link(path),
        Ok(_) => fs::remove_dir_all(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn remove_link(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

// Directory symlinks on Windows are removed like directories.
#[cfg(windows)]
fn remove_link(path: &Path) -> io::Result<()> {
    fs::remove_dir(path).or_else(|_| fs::remove_file(path))
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Links `source_root/<cache_dir>` into `worktree_path/<cache_dir>`.
///
/// The link target is always absolute. Any pre-existing entry at the
/// destination is replaced, so calling this twice yields the same link both
/// times. A destination that already is the source cache (worktree and
/// source are the same checkout) fails before anything is removed.
pub fn link_cache_dir(
    ecosystem: &str,
    worktree_path: &Path,
    source_root: &Path,
    cache_dir: &str,
    missing: MissingCache,
    reporter: Option<&dyn ProgressReporter>,
) -> Result<BootstrapResult> {
    let source_cache = std::path::absolute(source_root.join(cache_dir))?;
    if !source_cache.is_dir() {
        return Ok(match missing {
            MissingCache::Fail => BootstrapResult::failure(
                ecosystem,
                Strategy::Symlink,
                format!(
                    "No {} found in {}. Install dependencies in the source checkout first.",
                    cache_dir,
                    source_root.display()
                ),
            ),
            MissingCache::Skip => BootstrapResult::success(
                ecosystem,
                Strategy::Symlink,
                format!("No {} in source checkout, nothing to link", cache_dir),
            ),
        });
    }

    let destination = worktree_path.join(cache_dir);
    if is_same_directory(&destination, &source_cache) {
        return Ok(BootstrapResult::failure(
            ecosystem,
            Strategy::Symlink,
            format!(
                "{} is the source checkout's own {}, refusing to replace it",
                destination.display(),
                cache_dir
            ),
        ));
    }

    emit(
        reporter,
        &format!("Linking {} -> {}", destination.display(), source_cache.display()),
    );

    remove_existing(&destination)
        .and_then(|()| symlink_dir(&source_cache, &destination))
        .map_err(|e| Error::Adapter {
            ecosystem: ecosystem.to_string(),
            message: format!("failed to link {}: {}", destination.display(), e),
        })?;
    info!(
        "Linked {} to {}",
        destination.display(),
        source_cache.display()
    );

    Ok(
        BootstrapResult::success(
            ecosystem,
            Strategy::Symlink,
            format!("Linked {} from source checkout", cache_dir),
        )
        .with_path(destination),
    )
}

/// True when `destination` is a real directory that resolves to `source_cache`.
/// A symlink left by an earlier run never counts.
fn is_same_directory(destination: &Path, source_cache: &Path) -> bool {
    if is_symlink(destination) {
        return false;
    }
    match (fs::canonicalize(destination), fs::canonicalize(source_cache)) {
        (Ok(destination), Ok(source_cache)) => destination == source_cache,
        _ => false,
    }
}

/// Removes `worktree_path/<cache_dir>` only if it is a symlink.
///
/// Real directories are left alone. Errors are swallowed.
pub fn unlink_cache_dir(worktree_path: &Path, cache_dir: &str) {
    let destination = worktree_path.join(cache_dir);
    if !is_symlink(&destination) {
        if destination.exists() {
            debug!("Not a symlink, leaving {} in place", destination.display());
        }
        return;
    }

    if let Err(e) = remove_link(&destination) {
        debug!("Failed to remove {}: {}", destination.display(), e);
    }
}
