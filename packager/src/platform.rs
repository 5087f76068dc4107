//! Host platform detection for binary variant selection.
//!
//! The packager identifies platforms by the raw operating system and machine
//! identifiers the environment reports (e.g. `"Windows"`/`"AMD64"`,
//! `"Darwin"`/`"arm64"`, `"Linux"`/`"x86_64"`). Parsing is exact-match only:
//! an unrecognised identifier maps to the `Unsupported` variant rather than
//! being coerced to a nearby platform, so the binary variant table in
//! [`crate::variant`] stays the single source of truth for what is shipped.

use std::fmt;

/// Operating systems the packager knows how to name.
///
/// `Unsupported` is representable so detection never fails, but no entry in
/// the binary variant table ever matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Microsoft Windows.
    Windows,
    /// macOS.
    Darwin,
    /// Linux.
    Linux,
    /// Anything else the environment reported.
    Unsupported,
}

impl Os {
    /// Parse a raw operating system identifier as reported by the
    /// environment (`uname -s` vocabulary).
    ///
    /// # Examples
    ///
    /// ```
    /// use mllint_packager::platform::Os;
    ///
    /// assert_eq!(Os::from_name("Darwin"), Os::Darwin);
    /// assert_eq!(Os::from_name("FreeBSD"), Os::Unsupported);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Windows" => Self::Windows,
            "Darwin" => Self::Darwin,
            "Linux" => Self::Linux,
            _ => Self::Unsupported,
        }
    }

    /// Return the operating system of the machine this code was compiled
    /// for.
    #[must_use]
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Darwin
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unsupported
        }
    }

    /// Return the lowercase name used in binary variant filenames.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processor architectures the packager knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 32-bit x86.
    X86,
    /// 64-bit x86.
    X86_64,
    /// 64-bit ARM.
    Arm64,
    /// Anything else the environment reported.
    Unsupported,
}

impl Arch {
    /// Parse a raw machine identifier as reported by the environment.
    ///
    /// Accepts the identifier vocabulary of the platforms mllint ships on:
    /// `i386`/`i686` (32-bit x86), `AMD64`/`x86_64` (64-bit x86), and
    /// `arm64`/`aarch64` (64-bit ARM). Everything else is `Unsupported`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mllint_packager::platform::Arch;
    ///
    /// assert_eq!(Arch::from_machine("AMD64"), Arch::X86_64);
    /// assert_eq!(Arch::from_machine("aarch64"), Arch::Arm64);
    /// assert_eq!(Arch::from_machine("mips"), Arch::Unsupported);
    /// ```
    #[must_use]
    pub fn from_machine(machine: &str) -> Self {
        match machine {
            "i386" | "i686" => Self::X86,
            "AMD64" | "x86_64" => Self::X86_64,
            "arm64" | "aarch64" => Self::Arm64,
            _ => Self::Unsupported,
        }
    }

    /// Return the architecture of the machine this code was compiled for.
    #[must_use]
    pub fn host() -> Self {
        if cfg!(target_arch = "x86") {
            Self::X86
        } else if cfg!(target_arch = "x86_64") {
            Self::X86_64
        } else if cfg!(target_arch = "aarch64") {
            Self::Arm64
        } else {
            Self::Unsupported
        }
    }

    /// Return the short name used in binary variant filenames.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "386",
            Self::X86_64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An (operating system, architecture) pair identifying one binary variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// The operating system component.
    pub os: Os,
    /// The architecture component.
    pub arch: Arch,
}

impl Platform {
    /// Construct a platform from its components.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Derive a platform from raw environment identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use mllint_packager::platform::{Arch, Os, Platform};
    ///
    /// let platform = Platform::from_uname("Linux", "aarch64");
    /// assert_eq!(platform.os, Os::Linux);
    /// assert_eq!(platform.arch, Arch::Arm64);
    /// ```
    #[must_use]
    pub fn from_uname(os_name: &str, machine: &str) -> Self {
        Self {
            os: Os::from_name(os_name),
            arch: Arch::from_machine(machine),
        }
    }

    /// The platform this packager was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: Os::host(),
            arch: Arch::host(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Reconstruct the canonical raw identifier pair for the host.
///
/// Produces the same strings the host environment would report: `"Windows"`
/// with `"AMD64"`, `"Darwin"` with `"arm64"`, `"Linux"` with `"x86_64"`,
/// and so on. Used when no explicit identifiers were supplied on the
/// command line.
#[must_use]
pub fn host_uname() -> (String, String) {
    let os = Os::host();
    let os_name = match os {
        Os::Windows => "Windows",
        Os::Darwin => "Darwin",
        Os::Linux => "Linux",
        Os::Unsupported => std::env::consts::OS,
    };
    let machine = match (os, Arch::host()) {
        (_, Arch::X86) => "i686",
        (Os::Windows, Arch::X86_64) => "AMD64",
        (_, Arch::X86_64) => "x86_64",
        (Os::Darwin, Arch::Arm64) => "arm64",
        (_, Arch::Arm64) => "aarch64",
        (_, Arch::Unsupported) => std::env::consts::ARCH,
    };
    (os_name.to_owned(), machine.to_owned())
}
