//! Delegation to the bundled mllint binary.
//!
//! The launcher is the installed entry point for the `mllint` command. It
//! locates the bundled binary next to its own executable, makes sure the
//! binary is runnable, spawns it with every received argument and the
//! caller's standard streams, and reports the child's exact exit code.
//! There is no timeout, retry, or fallback logic: one blocking spawn per
//! invocation, and every failure is fatal.

use crate::error::{LauncherError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Filename of the bundled binary, fixed by the packaging contract.
pub const BUNDLED_BINARY_NAME: &str = "mllint-exe";

/// Locate the bundled binary relative to the launcher's own executable.
///
/// # Errors
///
/// Returns [`LauncherError::LauncherLocation`] when the launcher's own
/// path cannot be determined.
pub fn bundled_binary_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| LauncherError::LauncherLocation {
        reason: e.to_string(),
    })?;
    let dir = exe.parent().ok_or_else(|| LauncherError::LauncherLocation {
        reason: "launcher executable has no parent directory".to_owned(),
    })?;
    Ok(dir.join(BUNDLED_BINARY_NAME))
}

/// Ensure the binary carries execute permission.
///
/// On Unix this ORs the execute bits into the current mode, leaving every
/// other bit untouched; already-executable binaries are left alone. On
/// other platforms this is a no-op.
///
/// # Errors
///
/// Returns an error if the binary's permissions cannot be read or
/// written.
pub fn ensure_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = std::fs::metadata(path)?;
        let mode = metadata.permissions().mode();
        if mode & 0o111 != 0o111 {
            let mut perms = metadata.permissions();
            perms.set_mode(mode | 0o111);
            std::fs::set_permissions(path, perms)?;
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Spawn the binary with the forwarded arguments and wait for it.
///
/// Standard input, output, and error are inherited from the launcher, so
/// the child talks directly to the caller's streams.
///
/// # Errors
///
/// Returns [`LauncherError::Spawn`] when the child process cannot be
/// started.
pub fn run(binary: &Path, args: &[OsString]) -> Result<i32> {
    let status = Command::new(binary)
        .args(args)
        .status()
        .map_err(|source| LauncherError::Spawn {
            path: binary.to_path_buf(),
            source,
        })?;
    Ok(exit_code_for_status(status))
}

/// Map a child exit status onto the launcher's own exit code.
///
/// The child's code is propagated unchanged. On Unix a signal-terminated
/// child maps to `128 + signal` per shell convention; a codeless exit on
/// other platforms maps to 1.
fn exit_code_for_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Run one full delegation: locate, ensure executable, spawn, report.
///
/// # Errors
///
/// Returns [`LauncherError::BinaryNotFound`] when the bundled binary is
/// absent, or any location, permission, or spawn failure.
pub fn delegate(args: &[OsString]) -> Result<i32> {
    let binary = bundled_binary_path()?;
    if !binary.is_file() {
        return Err(LauncherError::BinaryNotFound { path: binary });
    }
    ensure_executable(&binary)?;
    log::debug!("delegating to {}", binary.display());
    run(&binary, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        ensure_executable(&path).expect("mark script executable");
        path
    }

    #[cfg(unix)]
    #[test]
    fn ensure_executable_adds_only_execute_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mllint-exe");
        std::fs::write(&path, b"binary").expect("write file");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640))
            .expect("set permissions");

        ensure_executable(&path).expect("ensure executable");

        let mode = std::fs::metadata(&path)
            .expect("read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o751, "execute bits added, others untouched");
    }

    #[cfg(unix)]
    #[test]
    fn ensure_executable_is_idempotent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mllint-exe");
        std::fs::write(&path, b"binary").expect("write file");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("set permissions");

        ensure_executable(&path).expect("first call");
        ensure_executable(&path).expect("second call");

        let mode = std::fs::metadata(&path)
            .expect("read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn ensure_executable_fails_for_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = ensure_executable(&dir.path().join("not-there"));
        #[cfg(unix)]
        assert!(result.is_err());
        #[cfg(not(unix))]
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_spawn_failure_for_missing_binary() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("not-there");

        let err = run(&missing, &[]).expect_err("missing binary should fail to spawn");
        assert!(matches!(err, LauncherError::Spawn { path, .. } if path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn run_inherits_exit_code_zero() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = write_script(dir.path(), "ok", "exit 0");
        assert_eq!(run(&script, &[]).expect("script runs"), 0);
    }

    #[test]
    fn bundled_binary_path_is_sibling_of_launcher() {
        let path = bundled_binary_path().expect("current_exe resolves in tests");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(BUNDLED_BINARY_NAME)
        );
    }
}
