//! Error types for the Orbis engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error("terrain error: {0}")]
    Terrain(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
