//! Command implementations for the CLI.

mod bootstrap;
mod discovery;
mod progress_reporter;

pub use bootstrap::{cmd_bootstrap, cmd_cleanup, cmd_patch};
pub use discovery::{cmd_detect, cmd_monorepo};
