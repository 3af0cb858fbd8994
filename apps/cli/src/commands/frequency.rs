//! `prescale freq`: convert between a period and its frequency.

use std::io::{self, Write};

use prescale_core::api::{convert_frequency_time, RawFrequencyTimeFields};
use tracing::{debug, info, warn};

use super::{render, Outcome};
use crate::cli::FrequencyArgs;
use crate::config::OutputFormat;

pub fn run<O: Write, E: Write>(
    args: &FrequencyArgs,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome> {
    debug!(?args, "freq command");

    let result = convert_frequency_time(&RawFrequencyTimeFields::from(args));
    match &result {
        Ok(resolution) => info!(
            field = %resolution.field,
            value = %resolution.value,
            "Converted"
        ),
        Err(error) => warn!(kind = ?error.kind, field = ?error.field, "Conversion rejected: {}", error),
    }

    render(&result, format, out, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_frequency() {
        let args = FrequencyArgs {
            time: Some("1000".into()),
            frequency: None,
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(&args, OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(String::from_utf8(out).unwrap(), "Frequency: 1000.000000 Hz\n");
    }

    #[test]
    fn test_frequency_to_time_json() {
        let args = FrequencyArgs {
            time: None,
            frequency: Some("1000".into()),
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run(&args, OutputFormat::Json, &mut out, &mut err).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["field"], "time");
        assert_eq!(json["value"], "1000.000000000000");
        assert_eq!(json["unit"], "μs");
    }

    #[test]
    fn test_both_fields_rejected() {
        let args = FrequencyArgs {
            time: Some("1".into()),
            frequency: Some("1".into()),
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(&args, OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: Fill in exactly 1 of the 2 fields (got 2)\n"
        );
    }

    #[test]
    fn test_negative_time_rejected() {
        let args = FrequencyArgs {
            time: Some("-5".into()),
            frequency: None,
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(&args, OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: Time (μs) must be greater than zero\n"
        );
    }
}
