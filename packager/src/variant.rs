//! Binary variant table for prebuilt mllint executables.
//!
//! Each supported platform maps to exactly one prebuilt binary, named
//! `bin/mllint-<os>-<arch>` by the upstream build. The table is plain
//! configuration: adding support for a new platform means adding one entry
//! here (and teaching the upstream build to produce the binary).

use crate::error::{PackagerError, Result};
use crate::platform::{Arch, Os, Platform};
use camino::Utf8PathBuf;

/// The supported platform matrix and the relative path of each variant.
const BINARY_VARIANTS: &[(Os, Arch, &str)] = &[
    (Os::Windows, Arch::X86, "bin/mllint-windows-386"),
    (Os::Windows, Arch::X86_64, "bin/mllint-windows-amd64"),
    (Os::Darwin, Arch::X86_64, "bin/mllint-darwin-amd64"),
    (Os::Darwin, Arch::Arm64, "bin/mllint-darwin-arm64"),
    (Os::Linux, Arch::X86, "bin/mllint-linux-386"),
    (Os::Linux, Arch::X86_64, "bin/mllint-linux-amd64"),
    (Os::Linux, Arch::Arm64, "bin/mllint-linux-arm64"),
];

/// Look up the binary variant path for a platform.
///
/// Returns `None` when the platform has no prebuilt binary. Pure lookup;
/// no filesystem access.
#[must_use]
pub fn variant_path(platform: Platform) -> Option<Utf8PathBuf> {
    BINARY_VARIANTS
        .iter()
        .find(|(os, arch, _)| *os == platform.os && *arch == platform.arch)
        .map(|(_, _, path)| Utf8PathBuf::from(*path))
}

/// Resolve the binary variant for raw environment identifiers.
///
/// The identifiers are matched exactly against the documented supported
/// set; an unrecognised machine string for an otherwise-supported OS is
/// unsupported, never coerced to a nearby variant.
///
/// # Errors
///
/// Returns [`PackagerError::UnsupportedPlatform`] carrying the observed
/// identifiers when no table entry matches.
///
/// # Examples
///
/// ```
/// use mllint_packager::variant::resolve_binary;
///
/// let path = resolve_binary("Darwin", "arm64").expect("supported platform");
/// assert_eq!(path.as_str(), "bin/mllint-darwin-arm64");
///
/// assert!(resolve_binary("Windows", "arm64").is_err());
/// ```
pub fn resolve_binary(os_name: &str, machine: &str) -> Result<Utf8PathBuf> {
    let platform = Platform::from_uname(os_name, machine);
    variant_path(platform).ok_or_else(|| PackagerError::UnsupportedPlatform {
        os: os_name.to_owned(),
        machine: machine.to_owned(),
    })
}

/// Return the supported platforms in table order.
#[must_use]
pub fn supported_platforms() -> Vec<Platform> {
    BINARY_VARIANTS
        .iter()
        .map(|(os, arch, _)| Platform::new(*os, *arch))
        .collect()
}
