//! mllint packager library.
//!
//! This crate provides the core functionality for assembling a
//! platform-specific distribution archive around one prebuilt mllint
//! binary. It is used by the `mllint-packager` CLI binary and can be
//! consumed programmatically for testing or custom release workflows.
//!
//! # Modules
//!
//! - [`assembler`] - Package assembly pipeline orchestration
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types with recovery hints
//! - [`layout`] - Install layout decisions and the platform-specific override
//! - [`manifest`] - Package metadata and description loading
//! - [`output`] - Progress output and remediation guidance formatting
//! - [`platform`] - Host platform detection
//! - [`stager`] - Binary staging into the package directory
//! - [`toolchain`] - Build toolchain abstraction and archive creation
//! - [`variant`] - Binary variant table for supported platforms

pub mod assembler;
pub mod cli;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod output;
pub mod platform;
pub mod stager;
pub mod toolchain;
pub mod variant;
