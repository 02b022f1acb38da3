//! Python ecosystem adapter.
//!
//! Detects projects by their packaging files and links the source
//! checkout's virtual environment into the worktree. A missing `.venv` is
//! reported as success with nothing linked.

use std::path::Path;

use arbor_core::adapter::EcosystemAdapter;
use arbor_core::environment::{BootstrapResult, DetectionResult, Strategy};
use arbor_core::error::Result;
use arbor_core::link::{link_cache_dir, unlink_cache_dir, MissingCache};
use arbor_core::progress::ProgressReporter;

/// Files that mark a Python project, in probe order.
const MARKER_FILES: &[&str] = &["pyproject.toml", "requirements.txt", "setup.py", "Pipfile"];

/// Lock files in probe order, with the package manager each one implies.
const LOCK_FILES: &[(&str, &str)] = &[
    ("uv.lock", "uv"),
    ("poetry.lock", "poetry"),
    ("Pipfile.lock", "pipenv"),
];

/// Virtual environment directories, preferred first.
const VENV_DIRS: &[&str] = &[".venv", "venv"];

/// Adapter for Python projects with a local virtual environment.
pub struct PythonAdapter;

impl EcosystemAdapter for PythonAdapter {
    fn name(&self) -> &'static str {
        "python"
    }

    fn display_name(&self) -> &'static str {
        "Python"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn detect(&self, project_root: &Path) -> Option<DetectionResult> {
        let mut marker_files: Vec<String> = MARKER_FILES
            .iter()
            .filter(|marker| project_root.join(marker).is_file())
            .map(|marker| marker.to_string())
            .collect();
        if marker_files.is_empty() {
            return None;
        }

        let mut package_manager = None;
        for (lock_file, manager) in LOCK_FILES {
            if project_root.join(lock_file).is_file() {
                marker_files.push(lock_file.to_string());
                package_manager.get_or_insert(*manager);
            }
        }

        let package_manager = package_manager.unwrap_or_else(|| {
            if marker_files.iter().any(|m| m == "Pipfile") {
                "pipenv"
            } else {
                "pip"
            }
        });

        Some(DetectionResult::new(
            self.name(),
            Some(package_manager),
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
            Strategy::Symlink => {
                let Some(venv_dir) = VENV_DIRS
                    .iter()
                    .find(|dir| source_root.join(dir).is_dir())
                else {
                    return Ok(BootstrapResult::success(
                        self.name(),
                        Strategy::Symlink,
                        "No virtual environment in source checkout, nothing to link",
                    ));
                };

                link_cache_dir(
                    self.name(),
                    worktree_path,
                    source_root,
                    venv_dir,
                    MissingCache::Skip,
                    reporter,
                )
            }
        }
    }

    fn cleanup(&self, worktree_path: &Path) {
        for venv_dir in VENV_DIRS {
            unlink_cache_dir(worktree_path, venv_dir);
        }
    }
}
