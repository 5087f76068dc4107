//! Error types for the mllint packager.
//!
//! This module defines semantic error variants for every fatal condition in
//! the assembly pipeline. No variant is recovered or retried locally: each
//! one aborts the current build with a message naming the missing resource
//! or unsupported condition. The CLI layer adds remediation guidance for
//! the variants that have any (see [`crate::output`]).

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a distribution package.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// No binary variant exists for the detected platform.
    #[error("unsupported platform: {os} ({machine})")]
    UnsupportedPlatform {
        /// The raw operating system identifier that was observed.
        os: String,
        /// The raw machine identifier that was observed.
        machine: String,
    },

    /// The resolved binary variant is absent from the build tree.
    #[error("expected a compiled mllint binary at {path} but it does not exist")]
    MissingArtifact {
        /// Path where the binary was expected.
        path: Utf8PathBuf,
    },

    /// The long-description document could not be read.
    #[error("could not read long description from {path}: {source}")]
    DescriptionUnreadable {
        /// Path of the description document.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The staging directory exists but is not writable.
    #[error("staging directory {path} is not writable: {reason}")]
    StagingNotWritable {
        /// Path to the non-writable directory.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// Copying the binary into the staging directory failed.
    #[error("staging failed: {reason}")]
    StagingFailed {
        /// Description of the staging failure.
        reason: String,
    },

    /// Serializing the package metadata failed.
    #[error("metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_both_identifiers() {
        let err = PackagerError::UnsupportedPlatform {
            os: "FreeBSD".to_owned(),
            machine: "amd64".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("FreeBSD"));
        assert!(msg.contains("amd64"));
    }

    #[test]
    fn missing_artifact_names_expected_path() {
        let err = PackagerError::MissingArtifact {
            path: Utf8PathBuf::from("bin/mllint-linux-amd64"),
        };
        assert!(err.to_string().contains("bin/mllint-linux-amd64"));
    }

    #[test]
    fn description_unreadable_names_document_path() {
        let err = PackagerError::DescriptionUnreadable {
            path: Utf8PathBuf::from("ReadMe.md"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.contains("ReadMe.md"));
        // The source error is preserved via the Error trait.
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn staging_not_writable_includes_reason() {
        let err = PackagerError::StagingNotWritable {
            path: Utf8PathBuf::from("mllint"),
            reason: "permission denied".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mllint"));
        assert!(msg.contains("permission denied"));
    }
}
