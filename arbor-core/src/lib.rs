//! Core library for bootstrapping dependency environments in git worktrees.

pub mod adapter;
pub mod adapter_registry;
pub mod bootstrap;
pub mod config;
pub mod environment;
pub mod error;
pub mod jsonc;
pub mod link;
pub mod monorepo;
pub mod progress;
pub mod tsconfig;

pub use adapter::EcosystemAdapter;
pub use adapter_registry::AdapterRegistry;
pub use bootstrap::{Bootstrapper, NODE_ECOSYSTEM};
pub use config::{ArborConfig, BootstrapConfig, EcosystemOverride};
pub use environment::{BootstrapResult, DetectionResult, Strategy};
pub use error::{Error, Result};
pub use monorepo::{detect_monorepo, MonorepoInfo, MonorepoKind, WorkspacePackage};
pub use progress::{ProgressReporter, TracingReporter};
pub use tsconfig::{patch_tsconfig_files, PatchSummary};
