//! # Units
//!
//! Conversion between the units people type and the SI base units the
//! solvers work in.
//!
//! ```text
//!   user text ──► RawFieldInput ──► parse ──► × to_base ──► solver (Hz, s)
//!                                                              │
//!   display   ◄── format_fixed ◄── × from_base ◄───────────────┘
//! ```
//!
//! Scaling happens here and nowhere else; the formulas in `timer` and
//! `frequency` never see MHz or μs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal;
use crate::error::{CoreError, CoreResult};
use crate::types::Field;

const MEGA: Decimal = dec!(1000000);
const MICRO: Decimal = dec!(0.000001);

/// An input/display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Megahertz, for the timer clock.
    MegaHertz,
    /// Microseconds, for every time field.
    Microseconds,
    /// Hertz, for the converter frequency.
    Hertz,
    /// Dimensionless register count.
    Count,
}

impl Unit {
    /// Display symbol. Empty for plain counts.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::MegaHertz => "MHz",
            Unit::Microseconds => "μs",
            Unit::Hertz => "Hz",
            Unit::Count => "",
        }
    }

    /// Factor taking a value in this unit to SI base units.
    pub const fn to_base_factor(&self) -> Decimal {
        match self {
            Unit::MegaHertz => MEGA,
            Unit::Microseconds => MICRO,
            Unit::Hertz | Unit::Count => Decimal::ONE,
        }
    }

    /// Factor taking an SI base value back into this unit.
    ///
    /// Kept as an exact multiplier rather than dividing by
    /// [`Unit::to_base_factor`], so seconds → μs is `× 1000000`.
    pub const fn from_base_factor(&self) -> Decimal {
        match self {
            Unit::MegaHertz => MICRO,
            Unit::Microseconds => MEGA,
            Unit::Hertz | Unit::Count => Decimal::ONE,
        }
    }
}

/// Scales a value typed in `field`'s unit to base units.
///
/// A non-zero value that scales below the smallest `Decimal` (1e-28) is
/// `Overflow`, not zero.
pub fn to_base(field: Field, value: Decimal) -> CoreResult<Decimal> {
    scale(field, value, field.unit().to_base_factor())
}

/// Scales a base-unit value to `field`'s display unit.
pub fn from_base(field: Field, value: Decimal) -> CoreResult<Decimal> {
    scale(field, value, field.unit().from_base_factor())
}

fn scale(field: Field, value: Decimal, factor: Decimal) -> CoreResult<Decimal> {
    value
        .checked_mul(factor)
        .filter(|scaled| !scaled.is_zero() || value.is_zero())
        .ok_or(CoreError::Overflow { field })
}

// =============================================================================
// Raw Field Input
// =============================================================================

/// Raw text typed into one field.
///
/// The unit comes from the field itself, so a `RawFieldInput` for
/// [`Field::ClockFrequency`] is always read as MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFieldInput<'a> {
    pub field: Field,
    pub text: &'a str,
}

impl<'a> RawFieldInput<'a> {
    pub fn new(field: Field, text: &'a str) -> Self {
        RawFieldInput { field, text }
    }

    /// Reads an optional raw value. `None` and blank text are both "absent".
    pub fn optional(field: Field, text: Option<&'a str>) -> Self {
        RawFieldInput::new(field, text.unwrap_or(""))
    }

    /// Unit this field is typed in.
    pub fn unit(&self) -> Unit {
        self.field.unit()
    }

    /// Parses a decimal quantity and converts it to base units.
    ///
    /// ## Example
    /// ```rust
    /// use prescale_core::units::RawFieldInput;
    /// use prescale_core::Field;
    /// use rust_decimal_macros::dec;
    ///
    /// let clock = RawFieldInput::new(Field::ClockFrequency, "72");
    /// assert_eq!(clock.to_base_decimal().unwrap(), Some(dec!(72000000)));
    ///
    /// let time = RawFieldInput::new(Field::OverflowTime, "1000");
    /// assert_eq!(time.to_base_decimal().unwrap(), Some(dec!(0.001)));
    /// ```
    pub fn to_base_decimal(&self) -> CoreResult<Option<Decimal>> {
        match decimal::parse(self.field, self.text)? {
            Some(value) => to_base(self.field, value).map(Some),
            None => Ok(None),
        }
    }

    /// Parses a register count.
    pub fn to_integer(&self) -> CoreResult<Option<i64>> {
        decimal::parse_integer(self.field, self.text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_factors_are_reciprocal() {
        for unit in [Unit::MegaHertz, Unit::Microseconds, Unit::Hertz, Unit::Count] {
            assert_eq!(unit.to_base_factor() * unit.from_base_factor(), Decimal::ONE);
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Unit::MegaHertz.symbol(), "MHz");
        assert_eq!(Unit::Microseconds.symbol(), "μs");
        assert_eq!(Unit::Count.symbol(), "");
    }

    #[test]
    fn test_raw_input_scaling() {
        let clock = RawFieldInput::new(Field::ClockFrequency, "16");
        assert_eq!(clock.to_base_decimal().unwrap(), Some(dec!(16000000)));

        let time = RawFieldInput::new(Field::Time, "0.5");
        assert_eq!(time.to_base_decimal().unwrap(), Some(dec!(0.0000005)));

        let freq = RawFieldInput::new(Field::Frequency, "1000");
        assert_eq!(freq.to_base_decimal().unwrap(), Some(dec!(1000)));

        let absent = RawFieldInput::optional(Field::Frequency, None);
        assert_eq!(absent.to_base_decimal().unwrap(), None);
    }

    #[test]
    fn test_raw_input_errors_name_field() {
        let err = RawFieldInput::new(Field::OverflowTime, "1ms")
            .to_base_decimal()
            .unwrap_err();
        assert_eq!(err.field(), Some(Field::OverflowTime));

        let err = RawFieldInput::new(Field::AutoReload, "3.5").to_integer().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidInteger {
                field: Field::AutoReload,
                ..
            })
        ));

        let err = RawFieldInput::new(Field::Prescaler, "1e25").to_integer().unwrap_err();
        assert_eq!(err, CoreError::Overflow { field: Field::Prescaler });
    }

    #[test]
    fn test_from_base() {
        assert_eq!(from_base(Field::OverflowTime, dec!(1)).unwrap(), dec!(1000000));
        assert_eq!(from_base(Field::ClockFrequency, dec!(72000000)).unwrap(), dec!(72));
        assert_eq!(from_base(Field::Frequency, dec!(3)).unwrap(), dec!(3));
    }

    #[test]
    fn test_to_base_overflow() {
        let huge = Decimal::MAX;
        assert_eq!(
            to_base(Field::ClockFrequency, huge),
            Err(CoreError::Overflow {
                field: Field::ClockFrequency
            })
        );
    }

    #[test]
    fn test_to_base_underflow() {
        // 1e-25 μs is 1e-31 s, below the smallest Decimal.
        assert_eq!(
            to_base(Field::Time, dec!(0.0000000000000000000000001)),
            Err(CoreError::Overflow { field: Field::Time })
        );
        assert_eq!(to_base(Field::Time, Decimal::ZERO).unwrap(), Decimal::ZERO);

        let err = RawFieldInput::new(Field::OverflowTime, "1e-25")
            .to_base_decimal()
            .unwrap_err();
        assert_eq!(err, CoreError::Overflow { field: Field::OverflowTime });
    }
}
