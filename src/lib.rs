//! Closed enumeration registry with ordered singleton constants.
//!
//! Rust's native enums are closed at compile time, but their variant set
//! cannot be declared as data: per-constant payloads, declaration-order
//! ordinals, and identity-preserving serialization all have to be wired by
//! hand.  This crate provides that wiring as a registry.  A type declares
//! an ordered list of `(name, constructor arguments)` pairs; the registry
//! populates one singleton [`Symbol`] per name, exactly once, and every
//! later lookup — including deserialization — resolves back to the same
//! `'static` instance.
//!
//! ```
//! use enumera::{registry, ArgValue, EnumClass, EnumError, Symbol};
//!
//! struct Color {
//!     hex: Option<String>,
//! }
//!
//! impl EnumClass for Color {
//!     fn type_name() -> &'static str {
//!         "doc::Color"
//!     }
//!
//!     fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
//!         vec![
//!             ("RED", vec![]),
//!             ("BLUE", vec![ArgValue::Str("0x0000FF".to_string())]),
//!         ]
//!     }
//!
//!     fn construct(_name: &str, args: &[ArgValue]) -> Result<Self, EnumError> {
//!         Ok(Color {
//!             hex: args.first().and_then(|a| a.as_str()).map(str::to_string),
//!         })
//!     }
//! }
//!
//! let blue: &'static Symbol<Color> = registry::value_of::<Color>("BLUE")?;
//! assert_eq!(blue.ordinal(), 1);
//! assert_eq!(blue.get().hex.as_deref(), Some("0x0000FF"));
//! # Ok::<(), EnumError>(())
//! ```
//!
//! Alongside the registry: total-order comparator objects ([`Ordering`]),
//! a time-unit table built on the registry ([`time_unit::TimeUnit`]), and
//! a resource-path helper ([`resource`]).

#![forbid(unsafe_code)]

pub mod error;
pub mod ordering;
pub mod registry;
pub mod resource;
pub mod symbol;
pub mod time_unit;

pub use error::EnumError;
pub use ordering::Ordering;
pub use symbol::{ArgValue, EnumClass, Symbol, SymbolKey};
pub use time_unit::{DateInterval, TimeUnit};
