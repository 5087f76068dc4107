//! Error types for the mllint launcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while delegating to the bundled binary.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The launcher could not determine its own installed location.
    #[error("could not locate the mllint launcher: {reason}")]
    LauncherLocation {
        /// Description of why location failed.
        reason: String,
    },

    /// The bundled binary is absent from the package.
    #[error("bundled mllint binary not found at {path}")]
    BinaryNotFound {
        /// Path where the binary was expected.
        path: PathBuf,
    },

    /// Spawning the bundled binary failed.
    #[error("failed to run {path}: {source}")]
    Spawn {
        /// Path of the binary that failed to spawn.
        path: PathBuf,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`LauncherError`].
pub type Result<T> = std::result::Result<T, LauncherError>;
