use std::path::Path;

use arbor_core::adapter::EcosystemAdapter;
use arbor_core::environment::{BootstrapResult, DetectionResult, Strategy};
use arbor_core::error::Result;
use arbor_core::progress::ProgressReporter;

pub struct RustAdapter;

impl EcosystemAdapter for RustAdapter {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn display_name(&self) -> &'static str {
        "Rust"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn detect(&self, project_root: &Path) -> Option<DetectionResult> {
        if !project_root.join("Cargo.toml").is_file() {
            return None;
        }

        let mut marker_files = vec!["Cargo.toml".to_string()];
        if project_root.join("Cargo.lock").is_file() {
            marker_files.push("Cargo.lock".to_string());
        }

        Some(DetectionResult::new(self.name(), Some("cargo"), marker_files))
    }

    // Crates are fetched into the global CARGO_HOME registry.
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
            "Cargo uses the global registry cache, no per-worktree setup needed",
        ))
    }

    fn cleanup(&self, _worktree_path: &Path) {}
}
