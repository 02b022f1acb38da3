//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error in {}: {error}", path.display())]
    Json {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("TOML parse error in {}: {error}", path.display())]
    Toml {
        path: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid config {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Invalid strategy: {0}. Supported strategies: symlink, install, none")]
    InvalidStrategy(String),

    #[error("Adapter error for {ecosystem}: {message}")]
    Adapter { ecosystem: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
