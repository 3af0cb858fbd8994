//! # Frequency / Time Converter
//!
//! `f = 1 / t` and `t = 1 / f`, computed in decimal so that a μs value
//! converts to Hz and back without picking up binary noise.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::types::{Field, FrequencyTimePair};
use crate::validation::validate_frequency_time_pair;

/// Fills in whichever of time or frequency is missing.
///
/// ## Example
/// ```rust
/// use prescale_core::frequency::convert;
/// use prescale_core::FrequencyTimePair;
/// use rust_decimal_macros::dec;
///
/// let pair = convert(FrequencyTimePair {
///     time_seconds: Some(dec!(0.001)),
///     frequency_hz: None,
/// })
/// .unwrap();
///
/// assert_eq!(pair.frequency_hz, Some(dec!(1000)));
/// ```
pub fn convert(pair: FrequencyTimePair) -> CoreResult<FrequencyTimePair> {
    validate_frequency_time_pair(&pair)?;

    match (pair.time_seconds, pair.frequency_hz) {
        (Some(time), None) => Ok(FrequencyTimePair {
            time_seconds: Some(time),
            frequency_hz: Some(reciprocal(time, Field::Frequency)?),
        }),
        (None, Some(frequency)) => Ok(FrequencyTimePair {
            time_seconds: Some(reciprocal(frequency, Field::Time)?),
            frequency_hz: Some(frequency),
        }),
        _ => Err(CoreError::WrongFieldCount {
            expected: 1,
            total: 2,
            supplied: pair.supplied_count(),
        }),
    }
}

/// The field [`convert`] will fill in for this pair, if the shape is valid.
pub fn missing_field(pair: &FrequencyTimePair) -> Option<Field> {
    match (pair.time_seconds, pair.frequency_hz) {
        (Some(_), None) => Some(Field::Frequency),
        (None, Some(_)) => Some(Field::Time),
        _ => None,
    }
}

// value > 0 here, so the only failures are 1 / tiny leaving the decimal
// range and 1 / huge rounding to zero.
fn reciprocal(value: Decimal, field: Field) -> CoreResult<Decimal> {
    Decimal::ONE
        .checked_div(value)
        .filter(|result| !result.is_zero())
        .ok_or(CoreError::Overflow { field })
}

// =============================================================================
// Unit Tests
// =============================================================================
