//! Package assembly pipeline.
//!
//! Orchestrates one build: resolve the binary variant for the target
//! platform, verify it exists, stage it, load the long description, build
//! the manifest, and hand off to the build toolchain with the
//! platform-specific install layout forced for that single invocation.
//! Every failure is fatal; nothing is retried and no partial package is
//! produced.

use crate::error::{PackagerError, Result};
use crate::layout::{DefaultLayout, force_platform_specific};
use crate::manifest::{PackageManifest, load_description, version_from_env};
use crate::output::{success_message, write_stderr_line};
use crate::platform::Platform;
use crate::stager::Stager;
use crate::toolchain::{ArchiveToolchain, BuildToolchain, BuiltPackage};
use crate::variant::resolve_binary;
use camino::Utf8Path;
use std::io::Write;

/// Configuration for one package assembly run.
#[derive(Debug)]
pub struct AssembleConfig<'a> {
    /// Directory holding the prebuilt binaries (the `bin/` tree lives
    /// under it).
    pub source_dir: &'a Utf8Path,
    /// The package staging directory the binary is copied into.
    pub staging_dir: &'a Utf8Path,
    /// Path of the long-description document.
    pub readme: &'a Utf8Path,
    /// Raw operating system identifier for the target platform.
    pub os_name: &'a str,
    /// Raw machine identifier for the target platform.
    pub machine: &'a str,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// Assemble a distribution package using the production archive toolchain.
///
/// # Errors
///
/// Propagates [`PackagerError::UnsupportedPlatform`] unchanged from
/// variant resolution, [`PackagerError::MissingArtifact`] when the
/// resolved binary is absent, and any staging, description, or toolchain
/// failure.
pub fn assemble(
    config: &AssembleConfig<'_>,
    output_dir: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<BuiltPackage> {
    let platform = Platform::from_uname(config.os_name, config.machine);
    let toolchain = ArchiveToolchain::new(output_dir.to_owned(), platform);
    assemble_with(config, &toolchain, stderr)
}

/// Testable inner pipeline with an injected toolchain.
///
/// The production entry point [`assemble`] delegates here with the real
/// archive toolchain; tests inject capturing doubles.
pub fn assemble_with(
    config: &AssembleConfig<'_>,
    toolchain: &dyn BuildToolchain,
    stderr: &mut dyn Write,
) -> Result<BuiltPackage> {
    let variant = resolve_binary(config.os_name, config.machine)?;
    let source = config.source_dir.join(&variant);
    if !source.is_file() {
        return Err(PackagerError::MissingArtifact { path: source });
    }

    if !config.quiet {
        let platform = Platform::from_uname(config.os_name, config.machine);
        write_stderr_line(stderr, format!("Packaging mllint for {platform}..."));
    }

    let stager = Stager::new(config.staging_dir.to_owned());
    stager.prepare()?;
    let staged = stager.stage(&source)?;
    log::debug!("staged {source} as {staged}");

    let description = load_description(config.readme)?;
    let manifest = PackageManifest::new(version_from_env(), description);

    // The layout override is scoped to this one toolchain invocation.
    let layout = force_platform_specific(Box::new(DefaultLayout));
    let package = toolchain.build(&manifest, config.staging_dir, layout.as_ref())?;

    if !config.quiet {
        write_stderr_line(stderr, success_message(&package));
    }

    Ok(package)
}
