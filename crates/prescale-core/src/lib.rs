//! # prescale-core: Timer Register Math
//!
//! Pure calculation engine for hardware timer configuration. Given any three
//! of clock frequency, overflow time, prescaler (PSC) and auto-reload (ARR),
//! it solves for the fourth; it also converts between a period and its
//! frequency.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Prescale Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (prescale CLI, or any UI)                │   │
//! │  │     raw text per field ──► Resolution / ApiError ──► display    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RawTimerFields / RawFrequencyTimeFields│
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ prescale-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  decimal  │  │   units   │  │ validation│  │    api    │  │   │
//! │  │   │  parse    │  │  MHz, μs  │  │  counts   │  │ Resolution│  │   │
//! │  │   │  round    │  │  Hz       │  │  domains  │  │ ApiError  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────────────────┐  ┌───────────────────────┐         │   │
//! │  │   │  timer  (T·F = ticks) │  │  frequency  (f = 1/t) │         │   │
//! │  │   └───────────────────────┘  └───────────────────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Parameter sets and the [`Field`] enum
//! - [`decimal`] - Numeral parsing, register rounding, fixed-point display
//! - [`units`] - MHz / μs / Hz scaling to and from SI base units
//! - [`validation`] - Field-count and domain checks
//! - [`timer`] - `T = (ARR + 1)(PSC + 1) / F` solver
//! - [`frequency`] - Period / frequency converter
//! - [`api`] - Text-in, text-out boundary used by front ends
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Decimal Everywhere**: 28 significant digits, no binary floats
//! 2. **Base Units Inside**: solvers only ever see Hz and seconds
//! 3. **Explicit Errors**: every failure is a typed value naming its field
//! 4. **Stateless**: each call builds fresh values and returns new ones
//!
//! ## Example Usage
//!
//! ```rust
//! use prescale_core::api::{solve_timer, RawTimerFields};
//! use prescale_core::Field;
//!
//! let resolution = solve_timer(&RawTimerFields {
//!     clock: Some("72".into()),
//!     psc: Some("7199".into()),
//!     arr: Some("9999".into()),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(resolution.field, Field::OverflowTime);
//! assert_eq!(resolution.value, "1000000.000000000000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod decimal;
pub mod error;
pub mod frequency;
pub mod timer;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use api::{ApiError, ErrorKind, Resolution};
pub use error::{CoreError, ValidationError};
pub use timer::{RegisterEstimate, Solved, TimerSolution};
pub use types::*;
pub use units::Unit;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fractional digits shown for a solved clock frequency (MHz).
pub const CLOCK_DISPLAY_PLACES: u32 = 6;

/// Fractional digits shown for any solved time (μs).
///
/// Twelve places in μs resolves down to attoseconds, well past any real
/// timer, so the display never hides a difference the solver produced.
pub const TIME_DISPLAY_PLACES: u32 = 12;

/// Fractional digits shown for a converted frequency (Hz).
pub const FREQUENCY_DISPLAY_PLACES: u32 = 6;
