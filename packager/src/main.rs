//! mllint packager CLI entrypoint.
//!
//! This binary assembles a platform-specific distribution archive around
//! one prebuilt mllint binary. Fatal conditions print remediation guidance
//! before aborting.

use clap::Parser;
use mllint_packager::assembler::{AssembleConfig, assemble};
use mllint_packager::cli::{AssembleArgs, Cli, Command};
use mllint_packager::error::{PackagerError, Result};
use mllint_packager::output::{
    missing_artifact_guidance, supported_platforms_listing, write_stderr_line,
};
use mllint_packager::platform::host_uname;
use mllint_packager::variant::supported_platforms;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.assemble_args().verbosity);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Map the repeatable `-v` flag onto an env_logger default filter.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    if let Some(Command::Platforms) = &cli.command {
        print_platforms(stderr);
        return Ok(());
    }

    let args = cli.assemble_args();
    let (os_name, machine) = target_identifiers(args);

    if args.dry_run {
        print_dry_run_info(args, &os_name, &machine, stderr);
        return Ok(());
    }

    let config = AssembleConfig {
        source_dir: &args.source_dir,
        staging_dir: &args.staging_dir,
        readme: &args.readme,
        os_name: &os_name,
        machine: &machine,
        quiet: args.quiet,
    };
    assemble(&config, &args.output_dir, stderr)?;
    Ok(())
}

/// Resolve the target platform identifiers from the CLI or the host.
fn target_identifiers(args: &AssembleArgs) -> (String, String) {
    match (&args.os_name, &args.machine) {
        (Some(os_name), Some(machine)) => (os_name.clone(), machine.clone()),
        // --machine requires --os-name, so a lone --os-name pairs with the
        // host machine identifier.
        (Some(os_name), None) => (os_name.clone(), host_uname().1),
        _ => host_uname(),
    }
}

/// Print the supported platform table.
fn print_platforms(stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Supported platforms:");
    for platform in supported_platforms() {
        write_stderr_line(stderr, format!("  - {platform}"));
    }
}

/// Print dry run configuration information.
fn print_dry_run_info(args: &AssembleArgs, os_name: &str, machine: &str, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Target platform: {os_name} ({machine})"));
    write_stderr_line(stderr, format!("Source directory: {}", args.source_dir));
    write_stderr_line(stderr, format!("Staging directory: {}", args.staging_dir));
    write_stderr_line(stderr, format!("Description document: {}", args.readme));
    write_stderr_line(stderr, format!("Output directory: {}", args.output_dir));
    write_stderr_line(stderr, format!("Quiet: {}", args.quiet));
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            print_guidance(&err, stderr);
            write_stderr_line(stderr, &err);
            1
        }
    }
}

/// Print the remediation block for errors that have one.
fn print_guidance(err: &PackagerError, stderr: &mut dyn Write) {
    match err {
        PackagerError::UnsupportedPlatform { .. } => {
            write_stderr_line(stderr, "");
            write_stderr_line(stderr, supported_platforms_listing());
            write_stderr_line(stderr, "");
        }
        PackagerError::MissingArtifact { path } => {
            write_stderr_line(stderr, "");
            write_stderr_line(stderr, missing_artifact_guidance(path));
            write_stderr_line(stderr, "");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn unsupported_platform_prints_listing_before_error() {
        let err = PackagerError::UnsupportedPlatform {
            os: "Plan9".to_owned(),
            machine: "mips".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.contains("mllint currently supports"));
        assert!(text.contains("unsupported platform: Plan9 (mips)"));
        let listing_at = text.find("currently supports").expect("listing present");
        let error_at = text.find("unsupported platform").expect("error present");
        assert!(listing_at < error_at, "guidance should precede the error");
    }

    #[test]
    fn missing_artifact_prints_remediation() {
        let err = PackagerError::MissingArtifact {
            path: Utf8PathBuf::from("bin/mllint-linux-amd64"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.contains("bin/mllint-linux-amd64"));
        assert!(text.contains("did not exist"));
    }

    #[test]
    fn target_identifiers_default_to_host() {
        let args = AssembleArgs::default();
        assert_eq!(target_identifiers(&args), host_uname());
    }

    #[test]
    fn target_identifiers_prefer_explicit_pair() {
        let args = AssembleArgs {
            os_name: Some("Windows".to_owned()),
            machine: Some("AMD64".to_owned()),
            ..AssembleArgs::default()
        };
        assert_eq!(
            target_identifiers(&args),
            ("Windows".to_owned(), "AMD64".to_owned())
        );
    }
}
