//! mllint launcher library.
//!
//! The thin entry point shipped inside the mllint distribution package:
//! it forwards every `mllint` invocation to the bundled platform-specific
//! binary and relays its exit code. The delegation logic lives here so it
//! can be exercised by tests; the `mllint` binary is a minimal shell
//! around [`delegate::delegate`].
//!
//! # Modules
//!
//! - [`delegate`] - Binary location, permission handling, and spawning
//! - [`error`] - Semantic error types

pub mod delegate;
pub mod error;
