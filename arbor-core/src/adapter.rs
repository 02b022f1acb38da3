//! Ecosystem adapter trait for detecting and bootstrapping dependency caches.

use std::path::Path;

use crate::environment::{BootstrapResult, DetectionResult, Strategy};
use crate::error::Result;
use crate::progress::ProgressReporter;

/// Trait for language-ecosystem environment operations.
///
/// Adapters are stateless. Detection is read-only and never fails: any
/// filesystem error is treated as "not detected". Bootstrap reports expected
/// failures through [`BootstrapResult::success`]; an `Err` is reserved for
/// unexpected I/O conditions.
pub trait EcosystemAdapter: Send + Sync {
    /// Stable identifier, e.g. `nodejs`.
    fn name(&self) -> &'static str;

    /// Human-readable name, e.g. `Node.js`.
    fn display_name(&self) -> &'static str;

    /// Higher values are checked first.
    fn priority(&self) -> i32;

    fn detect(&self, project_root: &Path) -> Option<DetectionResult>;

    fn bootstrap(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        strategy: Strategy,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Result<BootstrapResult>;

    /// Best-effort removal of whatever `bootstrap` created.
    ///
    /// Must never delete real data: only symlinks are removed.
    fn cleanup(&self, worktree_path: &Path);
}
