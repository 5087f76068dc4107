//! mllint command entrypoint.
//!
//! Forwards the full argument vector to the bundled binary and exits with
//! the exit code it returned.

use mllint_launcher::delegate::delegate;
use std::ffi::OsString;

fn main() {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    match delegate(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mllint: {err}");
            std::process::exit(1);
        }
    }
}
