//! CLI argument definitions for the mllint packager.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Assemble platform-specific mllint distribution packages.
#[derive(Parser, Debug)]
#[command(name = "mllint-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Assemble platform-specific mllint distribution packages.\n\n",
    "mllint ships as a single prebuilt binary per platform. This tool picks ",
    "the binary matching the target operating system and architecture, ",
    "stages it into the package directory, and builds a distributable ",
    "archive whose contents are laid out under the platform-specific ",
    "install directory.\n\n",
    "By default the target platform is the host. Pass --os-name and ",
    "--machine (raw identifiers such as 'Windows'/'AMD64' or ",
    "'Linux'/'aarch64') to package for another platform.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package for the host platform:\n",
    "    $ mllint-packager\n\n",
    "  Package for 64-bit ARM Linux:\n",
    "    $ mllint-packager --os-name Linux --machine aarch64\n\n",
    "  Override the packaged version:\n",
    "    $ MLLINT_VERSION=0.2.0 mllint-packager\n\n",
    "  List the supported platforms:\n",
    "    $ mllint-packager platforms\n\n",
    "  Preview without writing anything:\n",
    "    $ mllint-packager --dry-run",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Assemble arguments (used when no subcommand is given).
    #[command(flatten)]
    pub assemble: AssembleArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assemble a distribution package (default when no subcommand given).
    Assemble(AssembleArgs),

    /// List the supported platforms.
    Platforms,
}

/// Arguments for the assemble command.
#[derive(Parser, Debug, Clone)]
pub struct AssembleArgs {
    /// Directory holding the prebuilt binaries [default: current directory].
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub source_dir: Utf8PathBuf,

    /// Package staging directory the binary is copied into.
    #[arg(long, value_name = "DIR", default_value = "mllint")]
    pub staging_dir: Utf8PathBuf,

    /// Long-description document included in the package metadata.
    #[arg(long, value_name = "FILE", default_value = "ReadMe.md")]
    pub readme: Utf8PathBuf,

    /// Directory the distribution archive is written to.
    #[arg(short, long, value_name = "DIR", default_value = "dist")]
    pub output_dir: Utf8PathBuf,

    /// Raw target operating system identifier [default: host].
    #[arg(long, value_name = "NAME")]
    pub os_name: Option<String>,

    /// Raw target machine identifier [default: host].
    #[arg(long, value_name = "NAME", requires = "os_name")]
    pub machine: Option<String>,

    /// Show configuration and exit without building.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Default for AssembleArgs {
    /// Creates an `AssembleArgs` instance with the CLI defaults.
    ///
    /// Useful for testing or programmatic construction where only specific
    /// fields need to be set.
    fn default() -> Self {
        Self {
            source_dir: Utf8PathBuf::from("."),
            staging_dir: Utf8PathBuf::from("mllint"),
            readme: Utf8PathBuf::from("ReadMe.md"),
            output_dir: Utf8PathBuf::from("dist"),
            os_name: None,
            machine: None,
            dry_run: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl Cli {
    /// Returns the effective assemble arguments.
    ///
    /// If an `Assemble` subcommand was provided, returns those arguments;
    /// otherwise returns the flattened arguments.
    #[must_use]
    pub fn assemble_args(&self) -> &AssembleArgs {
        match &self.command {
            Some(Command::Assemble(args)) => args,
            Some(Command::Platforms) | None => &self.assemble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_repository_layout() {
        let cli = Cli::parse_from(["mllint-packager"]);
        let args = cli.assemble_args();
        assert_eq!(args.source_dir.as_str(), ".");
        assert_eq!(args.staging_dir.as_str(), "mllint");
        assert_eq!(args.readme.as_str(), "ReadMe.md");
        assert_eq!(args.output_dir.as_str(), "dist");
        assert!(args.os_name.is_none());
    }

    #[test]
    fn subcommand_args_take_precedence() {
        let cli = Cli::parse_from(["mllint-packager", "assemble", "--output-dir", "out"]);
        assert_eq!(cli.assemble_args().output_dir.as_str(), "out");
    }

    #[test]
    fn machine_requires_os_name() {
        let result = Cli::try_parse_from(["mllint-packager", "--machine", "AMD64"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["mllint-packager", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn platforms_subcommand_parses() {
        let cli = Cli::parse_from(["mllint-packager", "platforms"]);
        assert!(matches!(cli.command, Some(Command::Platforms)));
    }
}
