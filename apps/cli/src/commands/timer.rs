//! `prescale timer`: solve the timer form.

use std::io::{self, Write};

use prescale_core::api::{solve_timer, RawTimerFields};
use tracing::{debug, info, warn};

use super::{render, Outcome};
use crate::cli::TimerArgs;
use crate::config::OutputFormat;

pub fn run<O: Write, E: Write>(
    args: &TimerArgs,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome> {
    debug!(?args, "timer command");

    let result = solve_timer(&RawTimerFields::from(args));
    match &result {
        Ok(resolution) => info!(
            field = %resolution.field,
            value = %resolution.value,
            "Timer solved"
        ),
        Err(error) => warn!(kind = ?error.kind, field = ?error.field, "Timer rejected: {}", error),
    }

    render(&result, format, out, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(clock: &str, time: &str, psc: &str, arr: &str) -> TimerArgs {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        TimerArgs {
            clock: field(clock),
            time: field(time),
            psc: field(psc),
            arr: field(arr),
        }
    }

    fn run_text(args: &TimerArgs) -> (Outcome, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(args, OutputFormat::Text, &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_text_output() {
        let (outcome, out, err) = run_text(&args("72", "", "7199", "9999"));
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(out, "Overflow time: 1000000.000000000000 μs\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_text_error_goes_to_stderr() {
        let (outcome, out, err) = run_text(&args("72", "", "", "9999"));
        assert_eq!(outcome, Outcome::Rejected);
        assert!(out.is_empty());
        assert_eq!(err, "error: Fill in exactly 3 of the 4 fields (got 2)\n");
    }

    #[test]
    fn test_json_output() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(
            &args("16", "1000", "", "999"),
            OutputFormat::Json,
            &mut out,
            &mut err,
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Solved);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["field"], "prescaler");
        assert_eq!(json["value"], "15");
        assert!(err.is_empty());
    }

    #[test]
    fn test_json_error_goes_to_stdout() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(
            &args("72", "1000", "3.5", ""),
            OutputFormat::Json,
            &mut out,
            &mut err,
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Rejected);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["kind"], "INVALID_INTEGER");
        assert_eq!(json["field"], "prescaler");
    }
}
