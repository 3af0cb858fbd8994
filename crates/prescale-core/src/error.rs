//! # Error Types
//!
//! Domain-specific error types for prescale-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  prescale-core errors (this file)                                       │
//! │  ├── ValidationError  - One field failed to parse or is out of domain   │
//! │  └── CoreError        - Whole-request failures (shape, overflow)        │
//! │                                                                         │
//! │  Boundary error (api.rs)                                                │
//! │  └── ApiError         - What a front end sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the field it is about
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::Field;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the solvers.
///
/// Nothing is retried and nothing is left behind: a failed call simply
/// returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The request did not have the one shape the solver accepts.
    ///
    /// ## When This Occurs
    /// - Timer: anything other than exactly 3 of the 4 fields filled
    /// - Converter: both or neither of time and frequency filled
    #[error("Fill in exactly {expected} of the {total} fields (got {supplied})")]
    WrongFieldCount {
        expected: usize,
        total: usize,
        supplied: usize,
    },

    /// An intermediate or final value left the representable range.
    ///
    /// Decimal arithmetic tops out near 7.9e28, bottoms out at 1e-28, and
    /// registers must fit an i64. Absurd inputs (ARR = 9e18 with PSC = 9e18,
    /// a time of `1e-25` μs, a typed `1e40`) land here rather than being
    /// misreported as malformed or as zero.
    #[error("{field} is out of the representable range for these inputs")]
    Overflow { field: Field },

    /// A single field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// The field this error is about, when there is one.
    pub fn field(&self) -> Option<Field> {
        match self {
            CoreError::WrongFieldCount { .. } => None,
            CoreError::Overflow { field } => Some(*field),
            CoreError::Validation(err) => Some(err.field()),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Per-field input errors.
///
/// These are produced while turning raw text into typed values, and while
/// checking typed values against the physical domain of each field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is not a decimal numeral.
    #[error("{field} must be a number, got '{input}'")]
    InvalidNumber { field: Field, input: String },

    /// The text is a number but not a whole one.
    ///
    /// ## User Workflow
    /// ```text
    /// PSC field: "3.5"
    ///      │
    ///      ▼
    /// InvalidInteger { field: Prescaler, input: "3.5" }
    ///      │
    ///      ▼
    /// UI shows: "Prescaler (PSC) must be a whole number, got '3.5'"
    /// ```
    #[error("{field} must be a whole number, got '{input}'")]
    InvalidInteger { field: Field, input: String },

    /// The value parsed but lies outside the field's domain.
    #[error("{field} must be {expected}")]
    InvalidValue {
        field: Field,
        expected: &'static str,
    },
}

impl ValidationError {
    /// The field that failed.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidNumber { field, .. }
            | ValidationError::InvalidInteger { field, .. }
            | ValidationError::InvalidValue { field, .. } => *field,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
