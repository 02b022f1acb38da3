//! TOML configuration for bootstrap policy, read from `arbor.toml`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::Strategy;
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "arbor.toml";

/// Project configuration as defined in `arbor.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// Bootstrap policy: a default strategy plus per-ecosystem overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub ecosystems: HashMap<String, EcosystemOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemOverride {
    pub enabled: Option<bool>,
    pub strategy: Option<Strategy>,
}

impl ArborConfig {
    /// Loads `arbor.toml` from `project_root`.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|error| Error::Toml { path, error })
    }
}

impl BootstrapConfig {
    /// Uses `strategy` as the default for every ecosystem without an override.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolves the strategy for one ecosystem.
    ///
    /// Returns `None` when the ecosystem is disabled.
    pub fn resolve(&self, ecosystem: &str) -> Option<Strategy> {
        match self.ecosystems.get(ecosystem) {
            Some(EcosystemOverride {
                enabled: Some(false),
                ..
            }) => None,
            Some(EcosystemOverride {
                strategy: Some(strategy),
                ..
            }) => Some(*strategy),
            _ => Some(self.strategy),
        }
    }
}
