//! # Validation Module
//!
//! Domain checks applied after parsing and before solving.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI / form)                                        │
//! │  └── Collects raw text only, no interpretation                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Parsing (decimal.rs)                                          │
//! │  ├── InvalidNumber  - not a numeral                                     │
//! │  ├── InvalidInteger - fractional register                               │
//! │  └── Overflow       - numeral outside the Decimal / i64 range           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  ├── WrongFieldCount - not exactly N of M fields                        │
//! │  └── InvalidValue    - zero/negative quantity, negative register        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Solvers: every denominator is now provably non-zero                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use prescale_core::validation::{validate_positive, validate_register};
//! use prescale_core::Field;
//! use rust_decimal_macros::dec;
//!
//! validate_positive(Field::ClockFrequency, dec!(72000000)).unwrap();
//! validate_register(Field::Prescaler, 7199).unwrap();
//! assert!(validate_register(Field::AutoReload, -1).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::types::{Field, FrequencyTimePair, TimerParameterSet};

// =============================================================================
// Shape Validators
// =============================================================================

/// Checks that exactly `expected` of `total` fields were supplied.
///
/// Over- and under-specified requests are both rejected; there is no
/// best-fit mode.
pub fn validate_field_count(expected: usize, total: usize, supplied: usize) -> CoreResult<()> {
    if supplied != expected {
        return Err(CoreError::WrongFieldCount {
            expected,
            total,
            supplied,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a physical quantity (clock, time, frequency).
///
/// ## Rules
/// - Must be strictly positive: a zero clock or zero period has no
///   meaning and would be a zero denominator.
pub fn validate_positive(field: Field, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidValue {
            field,
            expected: "greater than zero",
        });
    }

    Ok(())
}

/// Validates a register value.
///
/// ## Rules
/// - Must be non-negative. Zero is allowed (divide by 1 / count to 1).
pub fn validate_register(field: Field, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::InvalidValue {
            field,
            expected: "zero or greater",
        });
    }

    Ok(())
}

// =============================================================================
// Set Validators
// =============================================================================

/// Shape check followed by a domain check of every supplied timer field.
pub fn validate_timer_set(set: &TimerParameterSet) -> CoreResult<()> {
    validate_field_count(3, 4, set.supplied_count())?;

    if let Some(clock) = set.clock_frequency_hz {
        validate_positive(Field::ClockFrequency, clock)?;
    }
    if let Some(time) = set.overflow_time_seconds {
        validate_positive(Field::OverflowTime, time)?;
    }
    if let Some(psc) = set.prescaler {
        validate_register(Field::Prescaler, psc)?;
    }
    if let Some(arr) = set.auto_reload {
        validate_register(Field::AutoReload, arr)?;
    }

    Ok(())
}

/// Shape check followed by a domain check of the supplied converter field.
pub fn validate_frequency_time_pair(pair: &FrequencyTimePair) -> CoreResult<()> {
    validate_field_count(1, 2, pair.supplied_count())?;

    if let Some(time) = pair.time_seconds {
        validate_positive(Field::Time, time)?;
    }
    if let Some(frequency) = pair.frequency_hz {
        validate_positive(Field::Frequency, frequency)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_field_count() {
        assert!(validate_field_count(3, 4, 3).is_ok());
        assert_eq!(
            validate_field_count(3, 4, 4),
            Err(CoreError::WrongFieldCount {
                expected: 3,
                total: 4,
                supplied: 4
            })
        );
        assert!(validate_field_count(1, 2, 0).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(Field::Frequency, dec!(0.0001)).is_ok());
        assert!(validate_positive(Field::Frequency, dec!(0)).is_err());
        assert!(validate_positive(Field::Frequency, dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_register() {
        assert!(validate_register(Field::Prescaler, 0).is_ok());
        assert!(validate_register(Field::Prescaler, 65535).is_ok());
        let err = validate_register(Field::Prescaler, -1).unwrap_err();
        assert_eq!(err.to_string(), "Prescaler (PSC) must be zero or greater");
    }

    #[test]
    fn test_validate_timer_set_checks_count_first() {
        // Four fields, one of them invalid: the shape error wins.
        let set = TimerParameterSet {
            clock_frequency_hz: Some(dec!(0)),
            overflow_time_seconds: Some(dec!(1)),
            prescaler: Some(1),
            auto_reload: Some(1),
        };
        assert!(matches!(
            validate_timer_set(&set),
            Err(CoreError::WrongFieldCount { supplied: 4, .. })
        ));
    }

    #[test]
    fn test_validate_timer_set_domain() {
        let set = TimerParameterSet {
            clock_frequency_hz: Some(dec!(72000000)),
            overflow_time_seconds: Some(dec!(-1)),
            prescaler: Some(1),
            auto_reload: None,
        };
        let err = validate_timer_set(&set).unwrap_err();
        assert_eq!(err.field(), Some(Field::OverflowTime));
    }

    #[test]
    fn test_validate_pair() {
        let ok = FrequencyTimePair {
            time_seconds: Some(dec!(0.001)),
            frequency_hz: None,
        };
        assert!(validate_frequency_time_pair(&ok).is_ok());

        let both = FrequencyTimePair {
            time_seconds: Some(dec!(0.001)),
            frequency_hz: Some(dec!(1000)),
        };
        assert!(matches!(
            validate_frequency_time_pair(&both),
            Err(CoreError::WrongFieldCount { expected: 1, total: 2, supplied: 2 })
        ));

        let zero = FrequencyTimePair {
            time_seconds: None,
            frequency_hz: Some(dec!(0)),
        };
        assert_eq!(
            validate_frequency_time_pair(&zero).unwrap_err().field(),
            Some(Field::Frequency)
        );
    }
}
