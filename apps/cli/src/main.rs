//! Prescale CLI entry point.
//!
//! All the work happens in the library crate (`prescale_cli`) so the command
//! handlers can be unit tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    prescale_cli::run()
}
