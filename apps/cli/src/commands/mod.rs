//! # CLI Commands
//!
//! One module per subcommand, plus the shared rendering helpers.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CLI Commands                                   │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │  timer.rs       │  │  frequency.rs   │  │  formulas       │         │
//! │  │  ─────────────  │  │  ─────────────  │  │  ─────────────  │         │
//! │  │  solve_timer    │  │  convert_       │  │  formula_       │         │
//! │  │                 │  │  frequency_time │  │  reference      │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! │  Writers are passed in, so every handler is testable with a Vec<u8>.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod frequency;
pub mod timer;

use std::io::{self, Write};
use std::process::ExitCode;

use prescale_core::api::{formula_reference, ApiError, Resolution};
use tracing::debug;

use crate::cli::Command;
use crate::config::OutputFormat;

/// Exit status when the calculation itself was rejected.
const EXIT_CALCULATION: u8 = 1;

/// What a command produced, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A resolution was written.
    Solved,

    /// The core returned an `ApiError`, which was written.
    Rejected,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Solved => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::from(EXIT_CALCULATION),
        }
    }
}

/// Runs one parsed command.
pub fn dispatch<O: Write, E: Write>(
    command: &Command,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome> {
    match command {
        Command::Timer(args) => timer::run(args, format, out, err),
        Command::Frequency(args) => frequency::run(args, format, out, err),
        Command::Formulas => formulas(format, out),
    }
}

fn formulas<O: Write>(format: OutputFormat, out: &mut O) -> io::Result<Outcome> {
    debug!("formulas command");
    let reference = formula_reference();

    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", reference.timer)?;
            writeln!(out)?;
            writeln!(out, "{}", reference.frequency_time)?;
        }
        OutputFormat::Json => write_json(out, &reference)?,
    }

    Ok(Outcome::Solved)
}

// =============================================================================
// Rendering
// =============================================================================

/// Writes a core result. Text errors go to `err`; JSON always goes to `out`.
pub(crate) fn render<O: Write, E: Write>(
    result: &Result<Resolution, ApiError>,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome> {
    match (result, format) {
        (Ok(resolution), OutputFormat::Text) => {
            for line in &resolution.summary {
                writeln!(out, "{}", line)?;
            }
            Ok(Outcome::Solved)
        }
        (Ok(resolution), OutputFormat::Json) => {
            write_json(out, resolution)?;
            Ok(Outcome::Solved)
        }
        (Err(error), OutputFormat::Text) => {
            writeln!(err, "error: {}", error)?;
            Ok(Outcome::Rejected)
        }
        (Err(error), OutputFormat::Json) => {
            write_json(out, error)?;
            Ok(Outcome::Rejected)
        }
    }
}

fn write_json<O: Write, T: serde::Serialize>(out: &mut O, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulas_text() {
        let mut out = Vec::new();
        let outcome = formulas(OutputFormat::Text, &mut out).unwrap();
        assert_eq!(outcome, Outcome::Solved);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("T = (ARR + 1) × (PSC + 1) / F_clock"));
        assert!(text.contains("Time      = 1 / Frequency"));
    }

    #[test]
    fn test_formulas_json() {
        let mut out = Vec::new();
        formulas(OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json["timer"].as_str().unwrap().starts_with("Timer overflow time"));
        assert!(json["frequencyTime"].is_string());
    }

    #[test]
    fn test_dispatch_formulas() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = dispatch(&Command::Formulas, OutputFormat::Text, &mut out, &mut err).unwrap();
        assert_eq!(outcome, Outcome::Solved);
        assert!(err.is_empty());
    }
}
