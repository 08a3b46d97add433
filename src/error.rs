//! Shared error taxonomy for the enumeration registry and its consumers.
//!
//! Every failure in this crate is unrecoverable at the point of detection
//! and is surfaced to the caller immediately.  All operations are
//! deterministic: a failed call fails identically on retry, including a
//! retried type initialization (the registry caches the first outcome).

use thiserror::Error;

/// Errors produced by the enumeration registry, the symbol lifecycle, the
/// time-unit table, and the resource-path helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumError {
    /// The enumeration declaration itself is malformed: empty or duplicate
    /// constant names, missing or mistyped constructor arguments, or a
    /// source layout that violates the module-per-file convention.
    #[error("invalid declaration for '{type_name}': {reason}")]
    Configuration { type_name: String, reason: String },

    /// Lookup of a constant name that the type does not declare.
    #[error("no constant named '{name}' in '{type_name}'")]
    UnknownName { type_name: String, name: String },

    /// An erased lookup referenced a type the registry has never populated.
    #[error("enumeration type '{type_name}' is not initialized")]
    UnknownType { type_name: String },

    /// Comparison or decoding across two unrelated enumeration types.
    /// Cross-type ordering is rejected outright, not treated as unordered.
    #[error("'{actual}' cannot be cast to '{expected}'")]
    ClassCast { expected: String, actual: String },

    /// An operation was invoked on an instance that lacks the required
    /// capability, e.g. a calendar-interval derivation on a unit with no
    /// declared interval format.
    #[error("illegal state: {reason}")]
    IllegalState { reason: String },
}
