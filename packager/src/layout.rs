//! Install layout decisions for the build toolchain.
//!
//! The build toolchain asks two questions while laying out a package: where
//! does a root-relative path land once re-rooted onto the install root, and
//! does the package contain compiled platform-dependent content? Its stock
//! answers are wrong for mllint: the stock re-rooting routine mishandles
//! drive-qualified Windows paths, and the stock classification heuristic
//! answers "pure", which would install the bundled binary into the
//! architecture-independent directory.
//!
//! Rather than mutating the toolchain, both decision points are expressed
//! as the [`InstallLayout`] trait and the corrected behaviour is injected
//! per build invocation via [`force_platform_specific`]. Applying the
//! override to an already-overridden layout is a no-op, so repeated
//! application within one process is safe.

use crate::platform::Os;
use camino::{Utf8Path, Utf8PathBuf};

/// The install directory class a package's contents are placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDir {
    /// Architecture-independent library directory.
    Purelib,
    /// Platform-specific library directory.
    Platlib,
}

impl InstallDir {
    /// Return the directory name used inside the distributable archive.
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Purelib => "purelib",
            Self::Platlib => "platlib",
        }
    }
}

/// The toolchain extension points this system controls.
///
/// Production code holds a `&dyn InstallLayout` so the override can be
/// substituted for the stock behaviour at build-invocation time, the same
/// way test doubles are substituted elsewhere in this crate.
pub trait InstallLayout {
    /// Re-root a root-relative `pathname` onto `new_root`.
    fn change_root(&self, new_root: &Utf8Path, pathname: &str) -> Utf8PathBuf;

    /// Whether the package contains compiled, platform-dependent content.
    fn has_platform_binaries(&self) -> bool;

    /// The install directory selected from the classification.
    fn install_dir(&self) -> InstallDir {
        if self.has_platform_binaries() {
            InstallDir::Platlib
        } else {
            InstallDir::Purelib
        }
    }

    /// Marker keeping override application idempotent.
    fn is_overridden(&self) -> bool {
        false
    }
}

impl<L: InstallLayout + ?Sized> InstallLayout for Box<L> {
    fn change_root(&self, new_root: &Utf8Path, pathname: &str) -> Utf8PathBuf {
        (**self).change_root(new_root, pathname)
    }

    fn has_platform_binaries(&self) -> bool {
        (**self).has_platform_binaries()
    }

    fn install_dir(&self) -> InstallDir {
        (**self).install_dir()
    }

    fn is_overridden(&self) -> bool {
        (**self).is_overridden()
    }
}

/// The toolchain's stock layout behaviour.
///
/// `change_root` strips leading separators and joins; it does not
/// understand drive specifiers, so a drive-qualified Windows pathname ends
/// up nested under the new root verbatim. The classification heuristic
/// looks at nothing and answers "pure". Both are the behaviours the
/// override exists to correct.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLayout;

impl InstallLayout for DefaultLayout {
    fn change_root(&self, new_root: &Utf8Path, pathname: &str) -> Utf8PathBuf {
        new_root.join(pathname.trim_start_matches(['/', '\\']))
    }

    fn has_platform_binaries(&self) -> bool {
        false
    }
}

/// The corrected, platform-specific layout override.
///
/// On Windows, `change_root` strips a redundant drive specifier and any
/// leading separator from the pathname before joining it onto the new
/// root; an empty pathname yields the root itself instead of failing. On
/// every other operating system it delegates unchanged to the wrapped
/// layout. Classification is forced to "platform-specific", so
/// [`InstallLayout::install_dir`] selects [`InstallDir::Platlib`].
///
/// The affected OS is an explicit field rather than a `#[cfg]` so both
/// branches stay testable on any host; [`PlatformSpecificLayout::new`]
/// pins it to the host OS.
#[derive(Debug, Clone)]
pub struct PlatformSpecificLayout<L> {
    inner: L,
    os: Os,
}

impl<L: InstallLayout> PlatformSpecificLayout<L> {
    /// Wrap a layout, keying the path-join correction on the host OS.
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self::with_os(inner, Os::host())
    }

    /// Wrap a layout with an explicit affected-OS value.
    #[must_use]
    pub fn with_os(inner: L, os: Os) -> Self {
        Self { inner, os }
    }
}

impl<L: InstallLayout> InstallLayout for PlatformSpecificLayout<L> {
    fn change_root(&self, new_root: &Utf8Path, pathname: &str) -> Utf8PathBuf {
        if self.os != Os::Windows {
            return self.inner.change_root(new_root, pathname);
        }

        let (_, path) = split_drive(pathname);
        let path = path.trim_start_matches(['\\', '/']);
        if path.is_empty() {
            return new_root.to_owned();
        }
        let root = new_root.as_str().trim_end_matches(['\\', '/']);
        Utf8PathBuf::from(format!("{root}\\{path}"))
    }

    fn has_platform_binaries(&self) -> bool {
        true
    }

    fn is_overridden(&self) -> bool {
        true
    }
}

/// Apply the platform-specific override to a layout.
///
/// Already-overridden layouts are returned unchanged, so calling this more
/// than once per process cannot double-wrap the correction.
#[must_use]
pub fn force_platform_specific(layout: Box<dyn InstallLayout>) -> Box<dyn InstallLayout> {
    if layout.is_overridden() {
        layout
    } else {
        Box::new(PlatformSpecificLayout::new(layout))
    }
}

/// Split a leading `X:` drive specifier off a pathname.
fn split_drive(pathname: &str) -> (&str, &str) {
    let bytes = pathname.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        pathname.split_at(2)
    } else {
        ("", pathname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn windows_override() -> PlatformSpecificLayout<DefaultLayout> {
        PlatformSpecificLayout::with_os(DefaultLayout, Os::Windows)
    }

    #[rstest]
    #[case::drive_qualified("C:\\out", "C:\\pkg\\file", "C:\\out\\pkg\\file")]
    #[case::separator_only("C:\\out", "\\pkg\\file", "C:\\out\\pkg\\file")]
    #[case::already_relative("C:\\out", "pkg\\file", "C:\\out\\pkg\\file")]
    #[case::empty_pathname("C:\\out", "", "C:\\out")]
    #[case::drive_only("C:\\out", "C:", "C:\\out")]
    fn windows_change_root_strips_drive_and_separator(
        #[case] root: &str,
        #[case] pathname: &str,
        #[case] expected: &str,
    ) {
        let layout = windows_override();
        let joined = layout.change_root(Utf8Path::new(root), pathname);
        assert_eq!(joined.as_str(), expected);
    }

    #[rstest]
    #[case::absolute("/pkg/mllint-exe")]
    #[case::relative("pkg/mllint-exe")]
    #[case::empty("")]
    fn non_windows_change_root_matches_default_routine(#[case] pathname: &str) {
        let root = Utf8Path::new("/out");
        let patched = PlatformSpecificLayout::with_os(DefaultLayout, Os::Linux);
        assert_eq!(
            patched.change_root(root, pathname),
            DefaultLayout.change_root(root, pathname),
        );
    }

    #[test]
    fn default_layout_classifies_as_pure() {
        assert!(!DefaultLayout.has_platform_binaries());
        assert_eq!(DefaultLayout.install_dir(), InstallDir::Purelib);
    }

    #[test]
    fn override_forces_platlib_selection() {
        let layout = windows_override();
        assert!(layout.has_platform_binaries());
        assert_eq!(layout.install_dir(), InstallDir::Platlib);
    }

    #[test]
    fn reapplying_the_override_is_a_no_op() {
        let once = force_platform_specific(Box::new(DefaultLayout));
        assert!(once.is_overridden());

        let twice = force_platform_specific(once);
        assert!(twice.is_overridden());
        assert_eq!(twice.install_dir(), InstallDir::Platlib);
    }

    #[test]
    fn direct_double_wrapping_composes_correctly() {
        let single = windows_override();
        let double = PlatformSpecificLayout::with_os(windows_override(), Os::Windows);

        let root = Utf8Path::new("C:\\out");
        assert_eq!(
            double.change_root(root, "C:\\pkg\\file"),
            single.change_root(root, "C:\\pkg\\file"),
        );
        assert_eq!(double.install_dir(), InstallDir::Platlib);
    }
}
