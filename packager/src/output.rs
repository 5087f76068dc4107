//! Output formatting for the packager CLI.
//!
//! Progress and guidance go to stderr through an injected writer so tests
//! can capture them. Fatal conditions with remediation (unsupported
//! platform, missing binary) get a guidance block printed before the error
//! line itself.

use crate::toolchain::BuiltPackage;
use camino::Utf8Path;
use std::io::Write;

/// Write a line to the given writer, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Human-readable listing of the platforms mllint ships binaries for.
///
/// Printed before aborting when the detected platform has no binary
/// variant.
#[must_use]
pub fn supported_platforms_listing() -> String {
    concat!(
        "Sorry, your OS is not supported. mllint currently supports:\n",
        "- Linux (32 or 64-bit x86, 64-bit ARM)\n",
        "- Windows (32 or 64-bit x86)\n",
        "- MacOS (64-bit x86, 64-bit ARM)"
    )
    .to_owned()
}

/// Remediation guidance for a missing prebuilt binary.
#[must_use]
pub fn missing_artifact_guidance(path: &Utf8Path) -> String {
    format!(
        concat!(
            "Expected to find a compiled mllint binary at {} but it did not exist!\n",
            "> If you're packaging mllint from source, run the upstream ",
            "build for all platforms first.\n",
            "> If you received this source tree from a release, the prebuilt ",
            "binaries were not included; fetch a platform-specific package instead."
        ),
        path
    )
}

/// Success message for a completed build.
#[must_use]
pub fn success_message(package: &BuiltPackage) -> String {
    format!(
        "Successfully built {} ({} data, sha256 {})",
        package.archive_path,
        package.install_dir.dir_name(),
        package.sha256
    )
}
