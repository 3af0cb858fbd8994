//! # Timer Solver
//!
//! Solves `T = (ARR + 1)(PSC + 1) / F` for whichever quantity is missing.
//!
//! ## One Identity, Four Branches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              T × F = (ARR + 1) × (PSC + 1)   (tick count)               │
//! │                                                                         │
//! │  missing F    F   = (ARR+1)(PSC+1) / T                                  │
//! │  missing T    T   = (ARR+1)(PSC+1) / F                                  │
//! │  missing PSC  PSC = F·T / (ARR+1) − 1   → round half up, clamp at 0     │
//! │  missing ARR  ARR = F·T / (PSC+1) − 1   → round half up, clamp at 0     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Denominators
//! After [`validate_timer_set`] every divisor is non-zero by construction:
//! `T > 0`, `F > 0`, and registers are `>= 0` so `ARR + 1 >= 1` and
//! `PSC + 1 >= 1`. The only arithmetic failure left is leaving the decimal
//! range, which is reported as [`CoreError::Overflow`].

use rust_decimal::Decimal;

use crate::decimal::{clamp_non_negative, round_to_nearest_integer};
use crate::error::{CoreError, CoreResult};
use crate::types::{Field, TimerParameterSet};
use crate::validation::validate_timer_set;

// =============================================================================
// Solution Types
// =============================================================================

/// A solved timer request with the detail a front end may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSolution {
    /// Input set with the missing field filled in.
    pub parameters: TimerParameterSet,

    /// Which field was solved, and how.
    pub solved: Solved,
}

/// The field a solve filled in.
///
/// Register solves always carry their [`RegisterEstimate`]; clock and time
/// solves are exact and carry only the value in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solved {
    /// Clock frequency in Hz.
    ClockFrequency(Decimal),
    /// Overflow time in seconds.
    OverflowTime(Decimal),
    Prescaler(RegisterEstimate),
    AutoReload(RegisterEstimate),
}

impl Solved {
    pub fn field(&self) -> Field {
        match self {
            Solved::ClockFrequency(_) => Field::ClockFrequency,
            Solved::OverflowTime(_) => Field::OverflowTime,
            Solved::Prescaler(_) => Field::Prescaler,
            Solved::AutoReload(_) => Field::AutoReload,
        }
    }

    /// The solved value in base units: Hz, seconds, or the recommended
    /// register count.
    pub fn value(&self) -> Decimal {
        match self {
            Solved::ClockFrequency(value) | Solved::OverflowTime(value) => *value,
            Solved::Prescaler(estimate) | Solved::AutoReload(estimate) => {
                Decimal::from(estimate.recommended)
            }
        }
    }

    /// Rounding detail, for register solves only.
    pub fn register(&self) -> Option<&RegisterEstimate> {
        match self {
            Solved::Prescaler(estimate) | Solved::AutoReload(estimate) => Some(estimate),
            Solved::ClockFrequency(_) | Solved::OverflowTime(_) => None,
        }
    }
}

/// How a register value was arrived at.
///
/// ## Example
/// ```text
/// F = 72 MHz, T = 333 μs, ARR = 999
///   exact PSC       = 72e6 × 333e-6 / 1000 − 1 = 22.976
///   recommended PSC = 23
///   achieved T      = 1000 × 24 / 72e6 = 333.333… μs
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterEstimate {
    /// Unrounded value straight from the formula.
    pub exact: Decimal,

    /// Value to program into the register.
    pub recommended: i64,

    /// True when the rounded value was negative and floored to zero,
    /// i.e. the requested period is shorter than the clock can express.
    pub clamped: bool,

    /// Overflow time produced by `recommended` together with the other
    /// register, in seconds.
    pub achieved_overflow_time_seconds: Decimal,
}

impl RegisterEstimate {
    /// True when no rounding or clamping was needed.
    pub fn is_exact(&self) -> bool {
        self.exact == Decimal::from(self.recommended)
    }
}

// =============================================================================
// Solver
// =============================================================================

/// Fills in the one missing field of a timer parameter set.
///
/// ## Example
/// ```rust
/// use prescale_core::timer::solve;
/// use prescale_core::TimerParameterSet;
/// use rust_decimal_macros::dec;
///
/// let solved = solve(TimerParameterSet {
///     clock_frequency_hz: Some(dec!(16000000)),
///     overflow_time_seconds: Some(dec!(0.001)),
///     prescaler: None,
///     auto_reload: Some(999),
/// })
/// .unwrap();
///
/// assert_eq!(solved.prescaler, Some(15));
/// ```
pub fn solve(set: TimerParameterSet) -> CoreResult<TimerParameterSet> {
    solve_detailed(set).map(|solution| solution.parameters)
}

/// Like [`solve`], but also reports rounding detail for register solves.
pub fn solve_detailed(set: TimerParameterSet) -> CoreResult<TimerSolution> {
    validate_timer_set(&set)?;

    match (
        set.clock_frequency_hz,
        set.overflow_time_seconds,
        set.prescaler,
        set.auto_reload,
    ) {
        (None, Some(time), Some(psc), Some(arr)) => {
            let field = Field::ClockFrequency;
            let clock = divide(tick_count(psc, arr, field)?, time, field)?;
            Ok(TimerSolution {
                parameters: TimerParameterSet {
                    clock_frequency_hz: Some(clock),
                    ..set
                },
                solved: Solved::ClockFrequency(clock),
            })
        }

        (Some(clock), None, Some(psc), Some(arr)) => {
            let field = Field::OverflowTime;
            let time = divide(tick_count(psc, arr, field)?, clock, field)?;
            Ok(TimerSolution {
                parameters: TimerParameterSet {
                    overflow_time_seconds: Some(time),
                    ..set
                },
                solved: Solved::OverflowTime(time),
            })
        }

        (Some(clock), Some(time), None, Some(arr)) => {
            let estimate = estimate_register(clock, time, arr, Field::Prescaler)?;
            Ok(TimerSolution {
                parameters: TimerParameterSet {
                    prescaler: Some(estimate.recommended),
                    ..set
                },
                solved: Solved::Prescaler(estimate),
            })
        }

        (Some(clock), Some(time), Some(psc), None) => {
            let estimate = estimate_register(clock, time, psc, Field::AutoReload)?;
            Ok(TimerSolution {
                parameters: TimerParameterSet {
                    auto_reload: Some(estimate.recommended),
                    ..set
                },
                solved: Solved::AutoReload(estimate),
            })
        }

        // validate_timer_set already guarantees exactly one None.
        _ => Err(CoreError::WrongFieldCount {
            expected: 3,
            total: 4,
            supplied: set.supplied_count(),
        }),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// `(PSC + 1) × (ARR + 1)`: clock ticks per overflow.
fn tick_count(psc: i64, arr: i64, field: Field) -> CoreResult<Decimal> {
    let overflow = || CoreError::Overflow { field };
    let psc_ticks = Decimal::from(psc).checked_add(Decimal::ONE).ok_or_else(overflow)?;
    let arr_ticks = Decimal::from(arr).checked_add(Decimal::ONE).ok_or_else(overflow)?;
    psc_ticks.checked_mul(arr_ticks).ok_or_else(overflow)
}

/// Checked division. A non-zero quotient too small for `Decimal` rounds to
/// zero silently, so that case is `Overflow` as well.
fn divide(numerator: Decimal, denominator: Decimal, field: Field) -> CoreResult<Decimal> {
    numerator
        .checked_div(denominator)
        .filter(|quotient| !quotient.is_zero() || numerator.is_zero())
        .ok_or(CoreError::Overflow { field })
}

/// Solves one register given the other: `F·T / (other + 1) − 1`.
fn estimate_register(
    clock: Decimal,
    time: Decimal,
    other: i64,
    field: Field,
) -> CoreResult<RegisterEstimate> {
    let overflow = || CoreError::Overflow { field };

    // F and T are both positive here, so a zero product is underflow.
    let ticks = clock
        .checked_mul(time)
        .filter(|ticks| !ticks.is_zero())
        .ok_or_else(overflow)?;
    let other_ticks = Decimal::from(other).checked_add(Decimal::ONE).ok_or_else(overflow)?;
    let exact = divide(ticks, other_ticks, field)?
        .checked_sub(Decimal::ONE)
        .ok_or_else(overflow)?;

    let rounded = round_to_nearest_integer(exact);
    let recommended = i64::try_from(clamp_non_negative(rounded)).map_err(|_| overflow())?;

    let achieved = divide(tick_count(recommended, other, field)?, clock, field)?;

    Ok(RegisterEstimate {
        exact,
        recommended,
        clamped: rounded < 0,
        achieved_overflow_time_seconds: achieved,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
