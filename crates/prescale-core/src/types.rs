//! # Domain Types
//!
//! Value sets passed into and out of the solvers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐       ┌──────────────────────────┐        │
//! │  │   TimerParameterSet      │       │   FrequencyTimePair      │        │
//! │  │  ──────────────────────  │       │  ──────────────────────  │        │
//! │  │  clock_frequency_hz?     │       │  time_seconds?           │        │
//! │  │  overflow_time_seconds?  │       │  frequency_hz?           │        │
//! │  │  prescaler?              │       └──────────────────────────┘        │
//! │  │  auto_reload?            │                                           │
//! │  └──────────────────────────┘       ┌──────────────────────────┐        │
//! │                                     │   Field                  │        │
//! │  All quantities in base SI units:   │  ──────────────────────  │        │
//! │  Hz and seconds. Unit scaling is    │  names one input field,  │        │
//! │  done before values get here.       │  its label and its unit  │        │
//! │                                     └──────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Sets are built fresh from raw text for every call and never mutated by the
//! solvers: `solve` / `convert` take a set by value and hand back a new one.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::units::Unit;

// =============================================================================
// Field
// =============================================================================

/// One semantic input field.
///
/// The timer form has four fields and the converter form has two. The
/// converter's `Time` is kept distinct from the timer's `OverflowTime` so that
/// error messages and resolutions always name the form they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Field {
    /// Timer input clock (entered in MHz).
    ClockFrequency,
    /// Time between two counter resets (entered in μs).
    OverflowTime,
    /// PSC register.
    Prescaler,
    /// ARR register.
    AutoReload,
    /// Converter time (entered in μs).
    Time,
    /// Converter frequency (entered in Hz).
    Frequency,
}

impl Field {
    /// The four timer fields, in form order.
    pub const TIMER: [Field; 4] = [
        Field::ClockFrequency,
        Field::OverflowTime,
        Field::Prescaler,
        Field::AutoReload,
    ];

    /// The two converter fields, in form order.
    pub const FREQUENCY_TIME: [Field; 2] = [Field::Time, Field::Frequency];

    /// Unit the user types this field in.
    pub const fn unit(&self) -> Unit {
        match self {
            Field::ClockFrequency => Unit::MegaHertz,
            Field::OverflowTime | Field::Time => Unit::Microseconds,
            Field::Frequency => Unit::Hertz,
            Field::Prescaler | Field::AutoReload => Unit::Count,
        }
    }

    /// Human-readable label, as shown next to the input.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::ClockFrequency => "Clock frequency (MHz)",
            Field::OverflowTime => "Overflow time (μs)",
            Field::Prescaler => "Prescaler (PSC)",
            Field::AutoReload => "Auto-reload (ARR)",
            Field::Time => "Time (μs)",
            Field::Frequency => "Frequency (Hz)",
        }
    }

    /// Label without the unit suffix, for result lines.
    pub const fn name(&self) -> &'static str {
        match self {
            Field::ClockFrequency => "Clock frequency",
            Field::OverflowTime => "Overflow time",
            Field::Prescaler => "Prescaler (PSC)",
            Field::AutoReload => "Auto-reload (ARR)",
            Field::Time => "Time",
            Field::Frequency => "Frequency",
        }
    }

    /// True for the two integer register fields.
    pub const fn is_register(&self) -> bool {
        matches!(self, Field::Prescaler | Field::AutoReload)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Timer Parameter Set
// =============================================================================

/// The four quantities of `T = (ARR + 1)(PSC + 1) / F`.
///
/// ## Invariant
/// On input to [`crate::timer::solve`] exactly one field is `None`; on output
/// that field is filled and the other three are echoed unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerParameterSet {
    /// Timer input clock in Hz (> 0).
    pub clock_frequency_hz: Option<Decimal>,

    /// Overflow period in seconds (> 0).
    pub overflow_time_seconds: Option<Decimal>,

    /// Prescaler register (>= 0).
    pub prescaler: Option<i64>,

    /// Auto-reload register (>= 0).
    pub auto_reload: Option<i64>,
}

impl TimerParameterSet {
    /// Number of fields that carry a value.
    pub fn supplied_count(&self) -> usize {
        [
            self.clock_frequency_hz.is_some(),
            self.overflow_time_seconds.is_some(),
            self.prescaler.is_some(),
            self.auto_reload.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Fields that carry no value, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        let present = [
            self.clock_frequency_hz.is_some(),
            self.overflow_time_seconds.is_some(),
            self.prescaler.is_some(),
            self.auto_reload.is_some(),
        ];
        Field::TIMER
            .into_iter()
            .zip(present)
            .filter_map(|(field, present)| (!present).then_some(field))
            .collect()
    }
}

// =============================================================================
// Frequency / Time Pair
// =============================================================================

/// A period and its frequency, `f = 1 / t`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyTimePair {
    /// Period in seconds (> 0).
    pub time_seconds: Option<Decimal>,

    /// Frequency in Hz (> 0).
    pub frequency_hz: Option<Decimal>,
}

impl FrequencyTimePair {
    /// Number of fields that carry a value.
    pub fn supplied_count(&self) -> usize {
        usize::from(self.time_seconds.is_some()) + usize::from(self.frequency_hz.is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
