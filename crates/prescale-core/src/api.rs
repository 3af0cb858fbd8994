//! # Front-End Boundary
//!
//! Text in, text out. A front end hands over whatever the user typed into
//! each field and gets back either a formatted [`Resolution`] or an
//! [`ApiError`] it can show next to the offending field.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RawTimerFields { clock: "72", time: "", psc: "7199", arr: "9999" }     │
//! │           │                                                             │
//! │           ▼ parse (decimal.rs) + scale to Hz / s (units.rs)             │
//! │  TimerParameterSet                                                      │
//! │           │                                                             │
//! │           ▼ timer::solve_detailed                                       │
//! │  TimerSolution { solved: OverflowTime(1 s), .. }                        │
//! │           │                                                             │
//! │           ▼ scale to μs + format_fixed(12)                              │
//! │  Resolution { field: overflowTime, value: "1000000.000000000000" }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any step can fail; the first failure becomes the [`ApiError`]. Parsing
//! runs over every field before the field count is checked, so a garbage
//! entry is reported as garbage even on an over-filled form.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::decimal::format_fixed;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::frequency;
use crate::timer::{self, RegisterEstimate, Solved, TimerSolution};
use crate::types::{Field, FrequencyTimePair, TimerParameterSet};
use crate::units::{from_base, RawFieldInput};
use crate::{CLOCK_DISPLAY_PLACES, FREQUENCY_DISPLAY_PLACES, TIME_DISPLAY_PLACES};

/// Explanation shown beside the timer form.
pub const TIMER_FORMULA: &str = "\
Timer overflow time:
  T = (ARR + 1) × (PSC + 1) / F_clock
where
  T       = overflow time (s)
  ARR     = auto-reload value (integer)
  PSC     = prescaler (integer)
  F_clock = timer clock frequency (Hz)";

/// Explanation shown beside the frequency/time form.
pub const FREQUENCY_TIME_FORMULA: &str = "\
Time / frequency conversion:
  Frequency = 1 / Time
  Time      = 1 / Frequency";

// =============================================================================
// Request Types
// =============================================================================

/// Raw timer form. `None` and blank strings both mean "solve for this".
///
/// ## Units
/// `clock` in MHz, `time` in μs, `psc` / `arr` plain integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RawTimerFields {
    pub clock: Option<String>,
    pub time: Option<String>,
    pub psc: Option<String>,
    pub arr: Option<String>,
}

/// Raw converter form: `time` in μs, `frequency` in Hz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RawFrequencyTimeFields {
    pub time: Option<String>,
    pub frequency: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// The one field a request resolved, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Resolution {
    /// Which field was filled in.
    pub field: Field,

    /// Formatted value, in the field's display unit.
    pub value: String,

    /// Display unit symbol (`"MHz"`, `"μs"`, `"Hz"`, or empty for registers).
    pub unit: String,

    /// Lines for a result panel, first line always names the resolved field.
    pub summary: Vec<String>,
}

/// Machine-readable error category.
///
/// ## Usage in a Front End
/// ```typescript
/// if (err.kind === 'WRONG_FIELD_COUNT') highlightForm();
/// else highlightField(err.field);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorKind {
    WrongFieldCount,
    InvalidNumber,
    InvalidInteger,
    InvalidValue,
    Overflow,
}

/// Serializable error returned across the boundary.
///
/// ```json
/// { "kind": "INVALID_INTEGER", "field": "prescaler",
///   "message": "Prescaler (PSC) must be a whole number, got '3.5'" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[error("{message}")]
#[ts(export)]
pub struct ApiError {
    pub kind: ErrorKind,

    /// Offending field; absent for whole-form errors.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub field: Option<Field>,

    pub message: String,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let kind = match &err {
            CoreError::WrongFieldCount { .. } => ErrorKind::WrongFieldCount,
            CoreError::Overflow { .. } => ErrorKind::Overflow,
            CoreError::Validation(ValidationError::InvalidNumber { .. }) => ErrorKind::InvalidNumber,
            CoreError::Validation(ValidationError::InvalidInteger { .. }) => {
                ErrorKind::InvalidInteger
            }
            CoreError::Validation(ValidationError::InvalidValue { .. }) => ErrorKind::InvalidValue,
        };

        ApiError {
            kind,
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// The two formula texts, for a help panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaReference {
    pub timer: &'static str,
    pub frequency_time: &'static str,
}

// =============================================================================
// Operations
// =============================================================================

/// Solves the timer form for its one empty field.
pub fn solve_timer(raw: &RawTimerFields) -> Result<Resolution, ApiError> {
    let set = parse_timer_fields(raw)?;
    let solution = timer::solve_detailed(set)?;
    Ok(timer_resolution(&solution)?)
}

/// Fills whichever of time or frequency is empty.
pub fn convert_frequency_time(raw: &RawFrequencyTimeFields) -> Result<Resolution, ApiError> {
    let pair = parse_frequency_time_fields(raw)?;
    let converted = frequency::convert(pair)?;

    let resolution = match (
        frequency::missing_field(&pair),
        converted.time_seconds,
        converted.frequency_hz,
    ) {
        (Some(Field::Frequency), _, Some(hz)) => {
            let value = format_fixed(hz, FREQUENCY_DISPLAY_PLACES);
            plain_resolution(Field::Frequency, value)
        }
        (Some(Field::Time), Some(seconds), _) => {
            let value = format_fixed(from_base(Field::Time, seconds)?, TIME_DISPLAY_PLACES);
            plain_resolution(Field::Time, value)
        }
        _ => {
            return Err(CoreError::WrongFieldCount {
                expected: 1,
                total: 2,
                supplied: pair.supplied_count(),
            }
            .into())
        }
    };

    Ok(resolution)
}

/// Formula explanations for both forms.
pub fn formula_reference() -> FormulaReference {
    FormulaReference {
        timer: TIMER_FORMULA,
        frequency_time: FREQUENCY_TIME_FORMULA,
    }
}

/// Parses and scales every timer field. Blank fields come back as `None`.
pub fn parse_timer_fields(raw: &RawTimerFields) -> CoreResult<TimerParameterSet> {
    Ok(TimerParameterSet {
        clock_frequency_hz: RawFieldInput::optional(Field::ClockFrequency, raw.clock.as_deref())
            .to_base_decimal()?,
        overflow_time_seconds: RawFieldInput::optional(Field::OverflowTime, raw.time.as_deref())
            .to_base_decimal()?,
        prescaler: RawFieldInput::optional(Field::Prescaler, raw.psc.as_deref()).to_integer()?,
        auto_reload: RawFieldInput::optional(Field::AutoReload, raw.arr.as_deref()).to_integer()?,
    })
}

/// Parses and scales both converter fields.
pub fn parse_frequency_time_fields(raw: &RawFrequencyTimeFields) -> CoreResult<FrequencyTimePair> {
    Ok(FrequencyTimePair {
        time_seconds: RawFieldInput::optional(Field::Time, raw.time.as_deref())
            .to_base_decimal()?,
        frequency_hz: RawFieldInput::optional(Field::Frequency, raw.frequency.as_deref())
            .to_base_decimal()?,
    })
}

// =============================================================================
// Formatting
// =============================================================================

fn plain_resolution(field: Field, value: String) -> Resolution {
    let unit = field.unit().symbol();
    let summary = vec![format!("{}: {} {}", field.name(), value, unit)];
    Resolution {
        field,
        value,
        unit: unit.to_string(),
        summary,
    }
}

fn timer_resolution(solution: &TimerSolution) -> CoreResult<Resolution> {
    let field = solution.solved.field();

    match &solution.solved {
        Solved::ClockFrequency(hz) => {
            let mhz = format_fixed(from_base(field, *hz)?, CLOCK_DISPLAY_PLACES);
            let summary = vec![format!(
                "{}: {} MHz ({} Hz)",
                field.name(),
                mhz,
                format_fixed(*hz, 0)
            )];
            Ok(Resolution {
                field,
                value: mhz,
                unit: field.unit().symbol().to_string(),
                summary,
            })
        }

        Solved::OverflowTime(seconds) => {
            let us = format_fixed(from_base(field, *seconds)?, TIME_DISPLAY_PLACES);
            Ok(plain_resolution(field, us))
        }

        Solved::Prescaler(estimate) | Solved::AutoReload(estimate) => {
            register_resolution(field, estimate)
        }
    }
}

fn register_resolution(field: Field, estimate: &RegisterEstimate) -> CoreResult<Resolution> {
    let value = estimate.recommended.to_string();
    let mut summary = vec![format!("{}: recommended {}", field.name(), value)];

    if estimate.clamped {
        summary.push(format!(
            "Requested overflow time is shorter than this clock allows; {} floored to 0",
            field.name()
        ));
    }
    if !estimate.is_exact() {
        let achieved = from_base(Field::OverflowTime, estimate.achieved_overflow_time_seconds)?;
        summary.push(format!("Exact value: {}", format_fixed(estimate.exact, 6)));
        summary.push(format!(
            "Achieved overflow time: {} μs",
            format_fixed(achieved, TIME_DISPLAY_PLACES)
        ));
    }

    Ok(Resolution {
        field,
        value,
        unit: String::new(),
        summary,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(clock: &str, time: &str, psc: &str, arr: &str) -> RawTimerFields {
        RawTimerFields {
            clock: Some(clock.to_string()),
            time: Some(time.to_string()),
            psc: Some(psc.to_string()),
            arr: Some(arr.to_string()),
        }
    }

    #[test]
    fn test_solve_overflow_time() {
        let res = solve_timer(&timer("72", "", "7199", "9999")).unwrap();
        assert_eq!(res.field, Field::OverflowTime);
        assert_eq!(res.value, "1000000.000000000000");
        assert_eq!(res.unit, "μs");
        assert_eq!(res.summary, vec!["Overflow time: 1000000.000000000000 μs"]);
    }

    #[test]
    fn test_solve_clock_summary_shows_hz() {
        let res = solve_timer(&timer("", "1000000", "7199", "9999")).unwrap();
        assert_eq!(res.field, Field::ClockFrequency);
        assert_eq!(res.value, "72.000000");
        assert_eq!(res.summary, vec!["Clock frequency: 72.000000 MHz (72000000 Hz)"]);
    }

    #[test]
    fn test_solve_prescaler_exact() {
        let res = solve_timer(&timer("16", "1000", "", "999")).unwrap();
        assert_eq!(res.field, Field::Prescaler);
        assert_eq!(res.value, "15");
        assert_eq!(res.unit, "");
        assert_eq!(res.summary, vec!["Prescaler (PSC): recommended 15"]);
    }

    #[test]
    fn test_solve_register_reports_rounding() {
        // 72 MHz × 12.5 μs = 900 ticks; 900 / 200 − 1 = 3.5 → 4
        let res = solve_timer(&timer("72", "12.5", "199", "")).unwrap();
        assert_eq!(res.value, "4");
        assert_eq!(
            res.summary,
            vec![
                "Auto-reload (ARR): recommended 4".to_string(),
                "Exact value: 3.500000".to_string(),
                "Achieved overflow time: 13.888888888889 μs".to_string(),
            ]
        );
    }

    #[test]
    fn test_solve_register_reports_clamp() {
        let res = solve_timer(&timer("1", "0.1", "", "0")).unwrap();
        assert_eq!(res.value, "0");
        assert_eq!(res.summary.len(), 4);
        assert!(res.summary[1].contains("floored to 0"));
        assert_eq!(res.summary[2], "Exact value: -0.900000");
    }

    #[test]
    fn test_convert_both_directions() {
        let res = convert_frequency_time(&RawFrequencyTimeFields {
            time: Some("1000".into()),
            frequency: None,
        })
        .unwrap();
        assert_eq!(res.field, Field::Frequency);
        assert_eq!(res.value, "1000.000000");
        assert_eq!(res.summary, vec!["Frequency: 1000.000000 Hz"]);

        let res = convert_frequency_time(&RawFrequencyTimeFields {
            time: Some("".into()),
            frequency: Some("1000".into()),
        })
        .unwrap();
        assert_eq!(res.field, Field::Time);
        assert_eq!(res.value, "1000.000000000000");
        assert_eq!(res.summary, vec!["Time: 1000.000000000000 μs"]);
    }

    #[test]
    fn test_error_kinds() {
        let err = solve_timer(&timer("72", "", "", "9999")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::WrongFieldCount);
        assert_eq!(err.field, None);
        assert_eq!(err.message, "Fill in exactly 3 of the 4 fields (got 2)");

        let err = solve_timer(&timer("72", "1000", "3.5", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInteger);
        assert_eq!(err.field, Some(Field::Prescaler));

        let err = solve_timer(&timer("fast", "1000", "1", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
        assert_eq!(err.field, Some(Field::ClockFrequency));

        let err = solve_timer(&timer("72", "-1", "1", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidValue);
        assert_eq!(err.field, Some(Field::OverflowTime));
    }

    #[test]
    fn test_parse_errors_precede_count_check() {
        // All four filled, one of them garbage.
        let err = solve_timer(&timer("72", "1000", "x", "9999")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
        assert_eq!(err.field, Some(Field::Prescaler));
    }

    #[test]
    fn test_api_error_json_shape() {
        let err = convert_frequency_time(&RawFrequencyTimeFields::default()).unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "WRONG_FIELD_COUNT");
        assert!(json.get("field").is_none());

        let err = convert_frequency_time(&RawFrequencyTimeFields {
            time: None,
            frequency: Some("0".into()),
        })
        .unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "INVALID_VALUE");
        assert_eq!(json["field"], "frequency");
        assert_eq!(json["message"], "Frequency (Hz) must be greater than zero");
    }

    #[test]
    fn test_wide_results_are_formatted() {
        // 1 Hz clock, 2^32 × 2^16 ticks: T = 2^48 s = 2.8e20 μs.
        let res = solve_timer(&timer("0.000001", "", "4294967295", "65535")).unwrap();
        assert_eq!(res.value, "281474976710656000000.000000000000");

        let res = convert_frequency_time(&RawFrequencyTimeFields {
            time: None,
            frequency: Some("0.00000000000001".into()),
        })
        .unwrap();
        assert_eq!(res.value, "100000000000000000000.000000000000");
    }

    #[test]
    fn test_out_of_range_numerals_are_overflow() {
        let err = solve_timer(&timer("1e40", "1000", "1", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.field, Some(Field::ClockFrequency));

        let err = solve_timer(&timer("72", "1e-25", "1", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.field, Some(Field::OverflowTime));

        let err = solve_timer(&timer("72", "", "99999999999999999999", "1")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.field, Some(Field::Prescaler));

        let err = convert_frequency_time(&RawFrequencyTimeFields {
            time: Some("0.00000000000000000000000000000001".into()),
            frequency: None,
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.field, Some(Field::Time));
    }

    #[test]
    fn test_api_error_field_is_optional_in_typescript() {
        let decl = ApiError::decl();
        assert!(decl.contains("field?: Field"), "{decl}");
    }

    #[test]
    fn test_formula_reference() {
        let formulas = formula_reference();
        assert!(formulas.timer.contains("T = (ARR + 1) × (PSC + 1) / F_clock"));
        assert!(formulas.frequency_time.contains("Frequency = 1 / Time"));
    }
}
