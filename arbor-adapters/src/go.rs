use std::path::Path;

use arbor_core::adapter::EcosystemAdapter;
use arbor_core::environment::{BootstrapResult, DetectionResult, Strategy};
use arbor_core::error::Result;
use arbor_core::progress::ProgressReporter;

pub struct GoAdapter;

impl EcosystemAdapter for GoAdapter {
    fn name(&self) -> &'static str {
        "go"
    }

    fn display_name(&self) -> &'static str {
        "Go"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn detect(&self, project_root: &Path) -> Option<DetectionResult> {
        if !project_root.join("go.mod").is_file() {
            return None;
        }

        let mut marker_files = vec!["go.mod".to_string()];
        if project_root.join("go.sum").is_file() {
            marker_files.push("go.sum".to_string());
        }

        Some(DetectionResult::new(self.name(), Some("go"), marker_files))
    }

    // Modules live in the global GOMODCACHE, shared by every checkout.
    fn bootstrap(
        &self,
        _worktree_path: &Path,
        _source_root: &Path,
        strategy: Strategy,
        _reporter: Option<&dyn ProgressReporter>,
    ) -> Result<BootstrapResult> {
        Ok(BootstrapResult::success(
            self.name(),
            strategy,
            "Go uses the global module cache, no per-worktree setup needed",
        ))
    }

    fn cleanup(&self, _worktree_path: &Path) {}
}
