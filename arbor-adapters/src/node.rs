use std::fs;
use std::path::Path;

use arbor_core::adapter::EcosystemAdapter;
use arbor_core::environment::{BootstrapResult, DetectionResult, Strategy};
use arbor_core::error::Result;
use arbor_core::link::{link_cache_dir, unlink_cache_dir, MissingCache};
use arbor_core::progress::ProgressReporter;
use arbor_core::NODE_ECOSYSTEM;
use serde_json::Value;

const PACKAGE_JSON: &str = "package.json";
const NODE_MODULES: &str = "node_modules";

/// Lock files in probe order, with the package manager each one implies.
const LOCK_FILES: &[(&str, &str)] = &[
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("bun.lockb", "bun"),
    ("bun.lock", "bun"),
    ("package-lock.json", "npm"),
];

pub struct NodeAdapter;

impl NodeAdapter {
    /// Reads the `packageManager` field (e.g. `pnpm@9.1.0`) when no lock file says otherwise.
    fn declared_package_manager(project_root: &Path) -> Option<String> {
        let content = fs::read_to_string(project_root.join(PACKAGE_JSON)).ok()?;
        let manifest: Value = serde_json::from_str(&content).ok()?;
        let declared = manifest.get("packageManager")?.as_str()?;
        let name = declared.split('@').next()?.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

impl EcosystemAdapter for NodeAdapter {
    fn name(&self) -> &'static str {
        NODE_ECOSYSTEM
    }

    fn display_name(&self) -> &'static str {
        "Node.js"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn detect(&self, project_root: &Path) -> Option<DetectionResult> {
        if !project_root.join(PACKAGE_JSON).is_file() {
            return None;
        }

        let mut marker_files = vec![PACKAGE_JSON.to_string()];
        let mut package_manager = None;
        for (lock_file, manager) in LOCK_FILES {
            if project_root.join(lock_file).is_file() {
                marker_files.push(lock_file.to_string());
                package_manager.get_or_insert(manager.to_string());
            }
        }

        let package_manager = package_manager
            .or_else(|| Self::declared_package_manager(project_root))
            .unwrap_or_else(|| "npm".to_string());

        Some(DetectionResult::new(
            self.name(),
            Some(package_manager.as_str()),
            marker_files,
        ))
    }

    fn bootstrap(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        strategy: Strategy,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Result<BootstrapResult> {
        match strategy {
            Strategy::None => Ok(BootstrapResult::skipped(self.name())),
            Strategy::Install => Ok(BootstrapResult::install_not_implemented(self.name())),
            Strategy::Symlink => link_cache_dir(
                self.name(),
                worktree_path,
                source_root,
                NODE_MODULES,
                MissingCache::Fail,
                reporter,
            ),
        }
    }

    fn cleanup(&self, worktree_path: &Path) {
        unlink_cache_dir(worktree_path, NODE_MODULES);
    }
}
