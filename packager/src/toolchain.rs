//! Build toolchain abstraction producing the distributable archive.
//!
//! The packaging entry point is behind the [`BuildToolchain`] trait so the
//! assembler can hand the install-layout override to the production
//! implementation while tests inject a capturing double. The production
//! [`ArchiveToolchain`] writes a gzipped tarball named
//! `mllint-<version>-<os>-<arch>.tar.gz` containing the staged package
//! files under the layout-selected install directory, plus a
//! `metadata.json` document, and records the archive's SHA-256 digest.

use crate::error::Result;
use crate::layout::{InstallDir, InstallLayout};
use crate::manifest::PackageManifest;
use crate::platform::Platform;
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;

/// The fixed file extension for distribution archives.
const DIST_EXTENSION: &str = ".tar.gz";

/// Filename of the metadata document inside the archive.
const METADATA_NAME: &str = "metadata.json";

/// The packaging entry point invoked by the assembler.
pub trait BuildToolchain {
    /// Produce a distributable archive from the staged package.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive or its metadata cannot be written.
    fn build(
        &self,
        manifest: &PackageManifest,
        staging_dir: &Utf8Path,
        layout: &dyn InstallLayout,
    ) -> Result<BuiltPackage>;
}

/// The distributable unit produced by a toolchain invocation.
#[derive(Debug)]
pub struct BuiltPackage {
    /// Path to the created archive.
    pub archive_path: Utf8PathBuf,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
    /// The install directory class the contents were laid out under.
    pub install_dir: InstallDir,
}

/// Compute the distribution archive filename for a manifest and platform.
///
/// # Examples
///
/// ```
/// use mllint_packager::manifest::PackageManifest;
/// use mllint_packager::platform::Platform;
/// use mllint_packager::toolchain::dist_filename;
///
/// let manifest = PackageManifest::new("0.1.2".to_owned(), String::new());
/// let platform = Platform::from_uname("Linux", "x86_64");
/// assert_eq!(dist_filename(&manifest, platform), "mllint-0.1.2-linux-amd64.tar.gz");
/// ```
#[must_use]
pub fn dist_filename(manifest: &PackageManifest, platform: Platform) -> String {
    format!(
        "{}-{}-{}{DIST_EXTENSION}",
        manifest.name(),
        manifest.version(),
        platform
    )
}

/// Production toolchain writing gzipped tar archives.
#[derive(Debug)]
pub struct ArchiveToolchain {
    output_dir: Utf8PathBuf,
    platform: Platform,
}

impl ArchiveToolchain {
    /// Create a toolchain writing archives for `platform` into
    /// `output_dir`.
    #[must_use]
    pub fn new(output_dir: Utf8PathBuf, platform: Platform) -> Self {
        Self {
            output_dir,
            platform,
        }
    }
}

impl BuildToolchain for ArchiveToolchain {
    fn build(
        &self,
        manifest: &PackageManifest,
        staging_dir: &Utf8Path,
        layout: &dyn InstallLayout,
    ) -> Result<BuiltPackage> {
        fs::create_dir_all(&self.output_dir)?;

        let archive_path = self.output_dir.join(dist_filename(manifest, self.platform));
        let install_dir = layout.install_dir();
        let install_root = Utf8PathBuf::from(install_dir.dir_name());

        let mut entries = collect_package_entries(manifest, staging_dir, &install_root, layout)?;

        // The metadata document is written next to the archive, appended
        // under its in-archive name, and removed once the archive exists.
        let metadata_path = self.output_dir.join(METADATA_NAME);
        fs::write(&metadata_path, serde_json::to_string_pretty(manifest)?)?;
        entries.push((metadata_path.clone(), METADATA_NAME.to_owned()));

        let result = create_archive(&archive_path, &entries);
        let _ = fs::remove_file(&metadata_path);
        result?;

        let sha256 = compute_sha256(&archive_path)?;
        log::debug!("built {archive_path} (sha256 {sha256})");

        Ok(BuiltPackage {
            archive_path,
            sha256,
            install_dir,
        })
    }
}

/// Collect `(source_path, archive_name)` pairs for the staged package
/// files, laid out under the install root via the layout's re-rooting
/// routine. Entries are sorted by name so archives are deterministic.
fn collect_package_entries(
    manifest: &PackageManifest,
    staging_dir: &Utf8Path,
    install_root: &Utf8Path,
    layout: &dyn InstallLayout,
) -> Result<Vec<(Utf8PathBuf, String)>> {
    let mut names: Vec<String> = Vec::new();
    for entry in staging_dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_owned());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            let pathname = format!("/{}/{name}", manifest.name());
            let archive_name = layout.change_root(install_root, &pathname);
            (staging_dir.join(&name), archive_name.into_string())
        })
        .collect())
}

/// Create a `.tar.gz` archive at `output_path`.
///
/// Each entry is a `(source_path, archive_name)` pair; the archive name
/// determines the path inside the tarball. File metadata, including mode
/// bits, is taken from the source files.
fn create_archive(output_path: &Utf8Path, files: &[(Utf8PathBuf, String)]) -> Result<()> {
    let output_file = fs::File::create(output_path)?;
    let encoder = flate2::write::GzEncoder::new(output_file, flate2::Compression::default());
    let mut archive = tar::Builder::new(encoder);

    for (source_path, archive_name) in files {
        archive.append_path_with_name(source_path, archive_name)?;
    }

    archive.into_inner()?.finish()?;
    Ok(())
}

/// Compute the SHA-256 digest of a file as lowercase hex.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
