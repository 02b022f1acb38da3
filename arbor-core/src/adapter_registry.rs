//! Registry for ecosystem adapters to support plugin-like extensibility.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::adapter::EcosystemAdapter;
use crate::environment::{BootstrapResult, DetectionResult, Strategy};
use crate::progress::{emit, ProgressReporter};

/// Holds at most one adapter per ecosystem name.
///
/// The registry is constructed explicitly and passed by reference; it is
/// mutated only while adapters are registered.
pub struct AdapterRegistry {
    adapters: IndexMap<String, Box<dyn EcosystemAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty adapter registry.
    pub fn new() -> Self {
        Self {
            adapters: IndexMap::new(),
        }
    }

    /// Registers an adapter under its name. The last registration wins.
    pub fn register<A>(&mut self, adapter: A)
    where
        A: EcosystemAdapter + 'static,
    {
        self.adapters
            .insert(adapter.name().to_string(), Box::new(adapter));
    }

    /// Gets the adapter registered for an ecosystem name.
    pub fn get(&self, name: &str) -> Option<&dyn EcosystemAdapter> {
        self.adapters.get(name).map(|adapter| adapter.as_ref())
    }

    /// Returns all adapters, highest priority first.
    ///
    /// Adapters with equal priority keep their registration order.
    pub fn adapters(&self) -> Vec<&dyn EcosystemAdapter> {
        let mut adapters: Vec<&dyn EcosystemAdapter> =
            self.adapters.values().map(|adapter| adapter.as_ref()).collect();
        adapters.sort_by(|a, b| b.priority().cmp(&a.priority()));
        adapters
    }

    /// Lists all registered ecosystem names in registration order.
    pub fn registered_names(&self) -> Vec<String> {
        self.adapters.keys().cloned().collect()
    }

    /// Runs every adapter's detection against `project_root`.
    ///
    /// Results are ordered by descending confidence; ties keep priority order.
    pub fn detect_environments(&self, project_root: &Path) -> Vec<DetectionResult> {
        let mut detected: Vec<DetectionResult> = self
            .adapters()
            .into_iter()
            .filter_map(|adapter| adapter.detect(project_root))
            .collect();

        detected.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        debug!(
            "Detected {} ecosystem(s) in {}",
            detected.len(),
            project_root.display()
        );
        detected
    }

    /// Bootstraps every ecosystem detected in `source_root` with one strategy.
    pub fn bootstrap_all(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        strategy: Strategy,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Vec<BootstrapResult> {
        self.bootstrap_all_with(worktree_path, source_root, |_| Some(strategy), reporter)
    }

    /// Bootstraps every ecosystem detected in `source_root`, resolving the
    /// strategy per ecosystem.
    ///
    /// `resolve` returns `None` to skip an ecosystem entirely. A failing
    /// adapter never prevents the following adapters from running.
    pub fn bootstrap_all_with<F>(
        &self,
        worktree_path: &Path,
        source_root: &Path,
        resolve: F,
        reporter: Option<&dyn ProgressReporter>,
    ) -> Vec<BootstrapResult>
    where
        F: Fn(&str) -> Option<Strategy>,
    {
        let mut results = Vec::new();

        for detection in self.detect_environments(source_root) {
            let Some(adapter) = self.get(&detection.name) else {
                continue;
            };

            let Some(strategy) = resolve(adapter.name()) else {
                emit(
                    reporter,
                    &format!("Skipping {} (disabled)", adapter.display_name()),
                );
                continue;
            };

            emit(
                reporter,
                &format!(
                    "Bootstrapping {} ({})",
                    adapter.display_name(),
                    strategy
                ),
            );

            let result = adapter
                .bootstrap(worktree_path, source_root, strategy, reporter)
                .unwrap_or_else(|e| {
                    warn!("{} bootstrap failed: {}", adapter.display_name(), e);
                    BootstrapResult::failure(adapter.name(), strategy, e.to_string())
                });
            results.push(result);
        }

        results
    }

    /// Runs cleanup for every registered adapter, detected or not.
    pub fn cleanup_all(&self, worktree_path: &Path) {
        for adapter in self.adapters() {
            debug!("Cleaning up {} in {}", adapter.name(), worktree_path.display());
            adapter.cleanup(worktree_path);
        }
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
