//! Detection and bootstrap result models.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::monorepo::MonorepoInfo;

/// How a worktree acquires an ecosystem's dependencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Link the dependency cache of the source checkout into the worktree.
    #[default]
    Symlink,
    /// Run the package manager inside the worktree.
    Install,
    /// Leave the worktree untouched.
    None,
}

impl Strategy {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Symlink => "symlink",
            Strategy::Install => "install",
            Strategy::None => "none",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "symlink" => Ok(Strategy::Symlink),
            "install" => Ok(Strategy::Install),
            "none" => Ok(Strategy::None),
            _ => Err(Error::InvalidStrategy(s.to_string())),
        }
    }
}

/// Evidence that an ecosystem is in use in a directory.
///
/// Produced fresh on every detection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub name: String,
    /// Always 1.0 for a positive match today.
    pub confidence: f64,
    pub package_manager: Option<String>,
    /// Marker files that triggered the match, in probe order.
    pub marker_files: Vec<String>,
}

impl DetectionResult {
    pub fn new(
        name: impl Into<String>,
        package_manager: Option<&str>,
        marker_files: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            confidence: 1.0,
            package_manager: package_manager.map(|s| s.to_string()),
            marker_files,
        }
    }
}

/// Outcome of bootstrapping one ecosystem into a worktree.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    pub environment: String,
    pub strategy: Strategy,
    pub success: bool,
    pub message: String,
    /// What was created in the worktree, if anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig_patched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monorepo: Option<MonorepoInfo>,
}

impl BootstrapResult {
    pub fn success(environment: &str, strategy: Strategy, message: impl Into<String>) -> Self {
        Self {
            environment: environment.to_string(),
            strategy,
            success: true,
            message: message.into(),
            path: None,
            tsconfig_patched: None,
            monorepo: None,
        }
    }

    pub fn failure(environment: &str, strategy: Strategy, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(environment, strategy, message)
        }
    }

    /// Result for `Strategy::None`: always successful, never touches disk.
    pub fn skipped(environment: &str) -> Self {
        Self::success(environment, Strategy::None, "Skipped (strategy: none)")
    }

    /// Result for the install strategy, which has no implementation yet.
    pub fn install_not_implemented(environment: &str) -> Self {
        Self::failure(
            environment,
            Strategy::Install,
            format!("Install strategy is not yet implemented for {}", environment),
        )
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}
