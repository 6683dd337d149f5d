//! Argument handling for the two binaries.
//!
//! Each entry point parses its arguments into a `Behavior`, then executes it
//! against a `Logger`. Keeping those apart lets tests drive either half.

use crate::logger::Logger;
use std::io::Write;
use std::process::ExitCode;

pub mod build;
pub mod filetree;

/// Report the result of executing a behavior, and pick an exit code.
fn conclude(result: std::io::Result<()>, log: &mut Logger) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            write!(log.stdout, "Failed to execute: {}\n", e).expect("Failed to print failure msg");
            ExitCode::from(1)
        }
    }
}
