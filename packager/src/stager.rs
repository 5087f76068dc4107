//! Staging of the resolved binary into the package directory.
//!
//! The staging directory holds the single binary copy that becomes part of
//! the distributable archive. It is written once here and treated as
//! read-only for the rest of the build.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Filename of the staged binary inside the package.
///
/// Fixed contract shared with the launcher, which looks the binary up
/// under this exact name at run time.
pub const STAGED_BINARY_NAME: &str = "mllint-exe";

/// Handles staging of the resolved binary variant.
pub struct Stager {
    staging_dir: Utf8PathBuf,
}

impl Stager {
    /// Create a stager for the given staging directory.
    #[must_use]
    pub fn new(staging_dir: Utf8PathBuf) -> Self {
        Self { staging_dir }
    }

    /// Ensure the staging directory exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or is not
    /// writable.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.staging_dir)?;

        // Verify writability by attempting to create a temp file
        let probe = self.staging_dir.join(".mllint-packager-test");
        match fs::write(&probe, b"test") {
            Ok(()) => {
                let _ = fs::remove_file(&probe);
                Ok(())
            }
            Err(e) => Err(PackagerError::StagingNotWritable {
                path: self.staging_dir.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Copy the resolved binary into the staging directory.
    ///
    /// `fs::copy` carries the source permission bits across, so an
    /// executable binary stays executable once staged.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingFailed`] if the copy fails.
    pub fn stage(&self, source: &Utf8Path) -> Result<Utf8PathBuf> {
        let dest = self.staged_path();

        fs::copy(source, &dest).map_err(|e| PackagerError::StagingFailed {
            reason: format!("failed to copy {source} to {dest}: {e}"),
        })?;

        Ok(dest)
    }

    /// Return the path the staged binary is written to.
    #[must_use]
    pub fn staged_path(&self) -> Utf8PathBuf {
        self.staging_dir.join(STAGED_BINARY_NAME)
    }

    /// Return the staging directory root.
    #[must_use]
    pub fn staging_dir(&self) -> &Utf8Path {
        &self.staging_dir
    }
}
