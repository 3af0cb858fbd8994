//! # Decimal Arithmetic
//!
//! Parsing, rounding and formatting helpers over [`rust_decimal::Decimal`].
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In f64:                                                                │
//! │    12.5 * 1e-6 = 1.2499999999999999e-05           ❌                    │
//! │    72e6 * 333e-6 / 1000 - 1 = 22.975999999999996  ❌                    │
//! │                                                                         │
//! │  With Decimal (28 significant digits):                                  │
//! │    12.5 * 0.000001 = 0.0000125                    ✅                    │
//! │    72000000 * 0.000333 / 1000 - 1 = 22.976        ✅                    │
//! │                                                                         │
//! │  Register values are recommended to the user as integers, so a stray   │
//! │  ulp on the wrong side of .5 changes the answer.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policies
//! - Registers: half away from zero (`2.5 → 3`, `-2.5 → -3`), then clamped at 0.
//! - Display digits: half to even, matching the fixed-point formatting of
//!   the values the user sees.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Field;

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal numeral.
///
/// Surrounding whitespace is ignored. Empty text is "absent" and yields
/// `Ok(None)`; anything else must be a plain numeral such as `72`, `-0.5`,
/// `.25` or `1e-6`.
///
/// ## Errors
/// - `InvalidNumber`: the text is not a numeral at all
/// - `Overflow`: a well-formed numeral that `Decimal` cannot hold, either
///   too large (`1e40`) or so small it would round to zero (`1e-29`)
///
/// ## Example
/// ```rust
/// use prescale_core::decimal::parse;
/// use prescale_core::Field;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse(Field::Frequency, " 1000 ").unwrap(), Some(dec!(1000)));
/// assert_eq!(parse(Field::Frequency, "").unwrap(), None);
/// assert!(parse(Field::Frequency, "1k").is_err());
/// ```
pub fn parse(field: Field, text: &str) -> CoreResult<Option<Decimal>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let numeral = Numeral::split(text).ok_or_else(|| ValidationError::InvalidNumber {
        field,
        input: text.to_string(),
    })?;

    numeral
        .to_decimal()
        .map(Some)
        .ok_or(CoreError::Overflow { field })
}

/// Parses a whole number.
///
/// Same rules as [`parse`], plus the value must have no fractional part.
/// `"4.0"` is accepted as 4; `"3.5"` is rejected with `InvalidInteger`.
/// A whole number beyond the i64 range (`1e25`) is `Overflow`.
pub fn parse_integer(field: Field, text: &str) -> CoreResult<Option<i64>> {
    let Some(value) = parse(field, text)? else {
        return Ok(None);
    };

    if !value.fract().is_zero() {
        return Err(ValidationError::InvalidInteger {
            field,
            input: text.trim().to_string(),
        }
        .into());
    }

    value
        .trunc()
        .to_i64()
        .map(Some)
        .ok_or(CoreError::Overflow { field })
}

/// A numeral that passed the grammar check:
/// `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least one
/// mantissa digit.
///
/// `Decimal::from_str` on its own is too lenient for user input (it skips
/// `_` separators), so the shape is checked before any conversion.
struct Numeral<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> Numeral<'a> {
    fn split(text: &'a str) -> Option<Self> {
        let is_sign = |c: char| c == '+' || c == '-';
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

        let negative = text.starts_with('-');
        let body = text.strip_prefix(is_sign).unwrap_or(text);

        let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !all_digits(whole) || !all_digits(fraction) {
            return None;
        }

        if let Some(exp) = exponent {
            let digits = exp.strip_prefix(is_sign).unwrap_or(exp);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
        }

        Some(Numeral {
            negative,
            whole,
            fraction,
            exponent,
        })
    }

    /// `None` when the value is outside what `Decimal` can represent.
    fn to_decimal(&self) -> Option<Decimal> {
        // Rebuilt as `-W.F` so ".5" and "3." reach rust_decimal in canonical form.
        let mut canonical = String::with_capacity(self.whole.len() + self.fraction.len() + 8);
        if self.negative {
            canonical.push('-');
        }
        canonical.push_str(if self.whole.is_empty() { "0" } else { self.whole });
        if !self.fraction.is_empty() {
            canonical.push('.');
            canonical.push_str(self.fraction);
        }

        let value = match self.exponent {
            Some(exp) => {
                canonical.push('e');
                canonical.push_str(exp);
                Decimal::from_scientific(&canonical).ok()?
            }
            None => canonical.parse::<Decimal>().ok()?,
        };

        // Excess fractional digits are rounded away; a non-zero numeral that
        // rounds all the way to zero has underflowed.
        if value.is_zero() && !self.is_zero() {
            return None;
        }

        Some(value)
    }

    fn is_zero(&self) -> bool {
        self.whole.bytes().chain(self.fraction.bytes()).all(|b| b == b'0')
    }
}

// =============================================================================
// Integer Rounding
// =============================================================================

/// Rounds to the nearest integer, ties away from zero.
///
/// ## Example
/// ```rust
/// use prescale_core::decimal::round_to_nearest_integer;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_to_nearest_integer(dec!(2.5)), 3);
/// assert_eq!(round_to_nearest_integer(dec!(2.4999)), 2);
/// assert_eq!(round_to_nearest_integer(dec!(-2.5)), -3);
/// ```
///
/// Every `Decimal` fits an `i128` once its scale is zero, so this cannot fail.
pub fn round_to_nearest_integer(value: Decimal) -> i128 {
    let mut rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(0);
    rounded.mantissa()
}

/// Floors negative register values to zero.
///
/// A negative PSC/ARR means the requested period is shorter than one clock
/// tick can express; 0 is the closest the hardware can get.
#[inline]
pub fn clamp_non_negative(value: i128) -> i128 {
    value.max(0)
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats with exactly `places` fractional digits.
///
/// Works for the full `Decimal` range: the digits come from `to_string` and
/// the zero padding is added here, so no fixed-size buffer limits how many
/// integer digits plus `places` can be shown.
///
/// ## Example
/// ```rust
/// use prescale_core::decimal::format_fixed;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_fixed(dec!(72), 6), "72.000000");
/// assert_eq!(format_fixed(dec!(0.1234565), 6), "0.123456");
/// ```
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }

    let mut text = rounded.to_string();
    let shown = text.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    let wanted = places as usize;

    if wanted > shown {
        if shown == 0 {
            text.push('.');
        }
        text.extend(std::iter::repeat('0').take(wanted - shown));
    }

    text
}

// =============================================================================
// Unit Tests
// =============================================================================
