//! Enumeration constants: per-name singletons with identity, ordering,
//! and identity-preserving serialization.
//!
//! A [`Symbol<T>`] is one constant of a closed enumeration type `T`.  All
//! symbols of a type are created together by the registry, exactly once,
//! and handed out as `&'static` references for the rest of the process
//! lifetime.  Equality is name equality within one type; ordering follows
//! declaration order.  Cross-type ordering does not type-check; the erased
//! [`SymbolKey`] retains the runtime-checked path and rejects it with a
//! cast error.
//!
//! Serialization encodes `(type identifier, name)` and nothing else.
//! Deserialization resolves that key back to the canonical singleton via
//! the registry; it never materializes a new instance.

use std::cmp;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EnumError;
use crate::registry;

// ---------------------------------------------------------------------------
// ArgValue — self-describing constructor argument
// ---------------------------------------------------------------------------

/// A constructor argument supplied by an enumeration declaration.
///
/// Declarations are plain data: each constant name maps to an ordered list
/// of `ArgValue`s, and the type's [`EnumClass::construct`] turns that list
/// into its payload.  A constant with no arguments receives an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    /// Numeric view: `Int` widens to `f64`, `Float` passes through.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "'{v}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// EnumClass — the construction contract a declaring type supplies
// ---------------------------------------------------------------------------

/// Contract an enumeration type supplies to the registry.
///
/// This is the sole extension point for defining a new enumeration: an
/// ordered list of `(name, constructor arguments)` pairs plus a constructor
/// that accepts exactly those argument lists.  The registry walks the
/// declaration once, in order, and assigns ordinals by position.
///
/// `type_name` is the canonical type identifier used for type-equality
/// checks and for the serialized form.  Implementations should return a
/// stable, fully qualified path such as `"enumera::time_unit::TimeUnit"` —
/// it must not change between releases while serialized symbols exist.
pub trait EnumClass: Sized + Send + Sync + 'static {
    /// Canonical, stable type identifier.
    fn type_name() -> &'static str;

    /// Ordered `(name, constructor arguments)` declaration.
    fn declaration() -> Vec<(&'static str, Vec<ArgValue>)>;

    /// Build the per-constant payload from one declared argument list.
    ///
    /// Returns `EnumError::Configuration` when the arguments are missing
    /// or mistyped; the registry then aborts initialization of the whole
    /// type rather than leave a partially populated set.
    fn construct(name: &str, args: &[ArgValue]) -> Result<Self, EnumError>;
}

// ---------------------------------------------------------------------------
// Symbol — the per-name singleton
// ---------------------------------------------------------------------------

/// One constant of the enumeration type `T`.
///
/// Symbols are only created during registry initialization and are handed
/// out as `&'static Symbol<T>`.  Fields are set once at construction and
/// have no mutating accessors; immutability is structural, not checked at
/// runtime.
pub struct Symbol<T: EnumClass> {
    name: &'static str,
    ordinal: usize,
    payload: T,
}

impl<T: EnumClass> Symbol<T> {
    pub(crate) fn new(name: &'static str, ordinal: usize, payload: T) -> Self {
        Self {
            name,
            ordinal,
            payload,
        }
    }

    /// The declared constant name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Zero-based position in declaration order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The per-constant payload built by [`EnumClass::construct`].
    pub fn get(&self) -> &T {
        &self.payload
    }

    /// Erased `(type, name)` key — the wire form of this symbol.
    pub fn key(&self) -> SymbolKey {
        SymbolKey {
            type_name: T::type_name().to_string(),
            name: self.name.to_string(),
        }
    }
}

impl<T: EnumClass> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<T: EnumClass> fmt::Debug for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("type", &T::type_name())
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .finish()
    }
}

/// Same concrete type (by construction) and same name; the ordinal is
/// implied equal because names are unique within a type.
impl<T: EnumClass> PartialEq for Symbol<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: EnumClass> Eq for Symbol<T> {}

impl<T: EnumClass> Hash for Symbol<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Declaration-order comparison.  Only symbols of the same enumeration
/// type can meet here, so cross-type ordering is a compile-time
/// impossibility; see [`SymbolKey::compare`] for the erased path.
impl<T: EnumClass> Ord for Symbol<T> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

impl<T: EnumClass> PartialOrd for Symbol<T> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Wire form: `{"type": ..., "name": ...}` and nothing else.
impl<T: EnumClass> Serialize for Symbol<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.key().serialize(serializer)
    }
}

/// Rehydration resolves the canonical singleton instead of reconstructing
/// an object graph: decode the `(type, name)` key, verify the type
/// identifier, then look the singleton up in the registry.
impl<'de, T: EnumClass> Deserialize<'de> for &'static Symbol<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = SymbolKey::deserialize(deserializer)?;
        if key.type_name != T::type_name() {
            return Err(D::Error::custom(EnumError::ClassCast {
                expected: T::type_name().to_string(),
                actual: key.type_name,
            }));
        }
        registry::value_of::<T>(&key.name).map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SymbolKey — erased (type, name) identity
// ---------------------------------------------------------------------------

/// Type-erased identity of a symbol: the canonical type identifier plus
/// the constant name.  This is both the serialized form and the carrier
/// for runtime-checked cross-type comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolKey {
    #[serde(rename = "type")]
    type_name: String,
    name: String,
}

impl SymbolKey {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration-order comparison across erased symbols.
    ///
    /// Fails with `EnumError::ClassCast` when the two keys belong to
    /// different enumeration types, regardless of their ordinals, and with
    /// `EnumError::UnknownType`/`UnknownName` when a key does not resolve
    /// against the registry.
    pub fn compare(&self, other: &SymbolKey) -> Result<cmp::Ordering, EnumError> {
        if self.type_name != other.type_name {
            return Err(EnumError::ClassCast {
                expected: self.type_name.clone(),
                actual: other.type_name.clone(),
            });
        }
        let lhs = registry::ordinal_of(&self.type_name, &self.name)?;
        let rhs = registry::ordinal_of(&other.type_name, &other.name)?;
        Ok(lhs.cmp(&rhs))
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
