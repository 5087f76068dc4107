//! Package manifest for the mllint distribution.
//!
//! The manifest carries the metadata embedded in each distributable archive
//! as `metadata.json`: package identity, the long description loaded from
//! the repository ReadMe, and the entry point binding the `mllint` command
//! to the launcher binary. It is constructed once per build invocation and
//! immutable thereafter.

use crate::error::{PackagerError, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// The distributed package name.
pub const PACKAGE_NAME: &str = "mllint";

/// Version used when no environment override is present.
pub const DEFAULT_VERSION: &str = "0.1.2";

/// Environment variable consulted for a version override.
///
/// Release builds export this so the packaged version tracks the tag being
/// released instead of the fallback default.
pub const VERSION_ENV_VAR: &str = "MLLINT_VERSION";

/// One-line summary shipped in the package metadata.
const SUMMARY: &str = "Linter for Machine Learning projects";

/// SPDX license identifier shipped in the package metadata.
const LICENSE: &str = "MIT";

/// Binding of a command name to the launcher that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// The command name users invoke.
    pub command: String,
    /// The launcher binary registered for the command.
    pub launcher: String,
}

impl Default for EntryPoint {
    fn default() -> Self {
        Self {
            command: PACKAGE_NAME.to_owned(),
            launcher: PACKAGE_NAME.to_owned(),
        }
    }
}

/// Metadata describing one distributable package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    name: String,
    version: String,
    summary: String,
    license: String,
    description: String,
    entry_point: EntryPoint,
}

impl PackageManifest {
    /// Construct a manifest for the given version and long description.
    ///
    /// # Examples
    ///
    /// ```
    /// use mllint_packager::manifest::PackageManifest;
    ///
    /// let manifest = PackageManifest::new("0.1.2".to_owned(), "# mllint".to_owned());
    /// assert_eq!(manifest.name(), "mllint");
    /// assert_eq!(manifest.version(), "0.1.2");
    /// ```
    #[must_use]
    pub fn new(version: String, description: String) -> Self {
        Self {
            name: PACKAGE_NAME.to_owned(),
            version,
            summary: SUMMARY.to_owned(),
            license: LICENSE.to_owned(),
            description,
            entry_point: EntryPoint::default(),
        }
    }

    /// Return the package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the package version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the long description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Return the entry point binding.
    #[must_use]
    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }
}

/// Read the package version from the environment, falling back to
/// [`DEFAULT_VERSION`] when the override is absent.
#[must_use]
pub fn version_from_env() -> String {
    std::env::var(VERSION_ENV_VAR).unwrap_or_else(|_| DEFAULT_VERSION.to_owned())
}

/// Load the long-description document from disk.
///
/// # Errors
///
/// Returns [`PackagerError::DescriptionUnreadable`] naming the document
/// path when it cannot be read.
pub fn load_description(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| PackagerError::DescriptionUnreadable {
        path: path.to_owned(),
        source,
    })
}
