//! Bootstrap orchestration for freshly created worktrees.

use std::path::Path;

use tracing::{debug, info};

use crate::adapter_registry::AdapterRegistry;
use crate::config::BootstrapConfig;
use crate::environment::{BootstrapResult, Strategy};
use crate::monorepo::detect_monorepo;
use crate::progress::{emit, ProgressReporter};
use crate::tsconfig::patch_tsconfig_files;

/// Name of the ecosystem whose monorepos get their `tsconfig.json` files patched.
pub const NODE_ECOSYSTEM: &str = "nodejs";

/// Entry point for preparing a worktree's dependency environments.
///
/// Runs detection and bootstrap across every registered adapter, then,
/// for JavaScript/TypeScript monorepos, points cross-package imports at
/// the worktree's own sources.
pub struct Bootstrapper<'a> {
    registry: &'a AdapterRegistry,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(registry: &'a AdapterRegistry) -> Self {
        Self { registry }
    }

    /// Bootstraps every ecosystem detected in `source_root` with one strategy.
    pub fn bootstrap(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        strategy: Strategy,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Vec<BootstrapResult> {
        let mut results = self
            .registry
            .bootstrap_all(worktree_path, source_root, strategy, reporter);
        self.patch_monorepo(worktree_path, &mut results, reporter);
        results
    }

    /// Bootstraps with the per-ecosystem policy from `config`.
    pub fn bootstrap_with_config(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        config: &BootstrapConfig,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Vec<BootstrapResult> {
        let mut results = self.registry.bootstrap_all_with(
            worktree_path,
            source_root,
            |ecosystem| config.resolve(ecosystem),
            reporter,
        );
        self.patch_monorepo(worktree_path, &mut results, reporter);
        results
    }

    /// Best-effort cleanup of everything any adapter may have created.
    pub fn cleanup(&self, worktree_path: &Path) {
        self.registry.cleanup_all(worktree_path);
    }

    fn patch_monorepo(
        &self,
        worktree_path: &Path,
        results: &mut [BootstrapResult],
        reporter: Option<&dyn ProgressReporter>,
    ) {
        let Some(node) = results.iter_mut().find(|r| {
            r.environment == NODE_ECOSYSTEM && r.success && r.strategy != Strategy::None
        }) else {
            return;
        };

        let monorepo = detect_monorepo(worktree_path);
        if !monorepo.is_monorepo {
            debug!(
                "{} is not a monorepo, no tsconfig patching",
                worktree_path.display()
            );
            return;
        }

        emit(
            reporter,
            &format!(
                "Patching tsconfig.json paths for {} workspace package(s)",
                monorepo.packages.len()
            ),
        );

        let summary = patch_tsconfig_files(worktree_path, &monorepo.packages);
        info!(
            "Patched {} of {} tsconfig.json file(s)",
            summary.patched.len(),
            summary.scanned.len()
        );

        node.tsconfig_patched = Some(summary.any_patched());
        node.monorepo = Some(monorepo);
    }
}
