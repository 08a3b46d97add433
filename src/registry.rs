//! One-time construction and indexing of enumeration constants.
//!
//! The registry owns the full lifecycle of every enumeration type: given a
//! type's declaration it constructs exactly one [`Symbol`] per declared
//! name, in declaration order, leaks them to `'static`, and indexes them
//! for lookup.  Population happens once per type behind a write lock, so
//! concurrent first-use never races and a partially populated set is never
//! observable.  The outcome — success or failure — is cached, so a retried
//! initialization fails identically instead of re-entering construction.
//!
//! After population every operation here is a pure read.  Uses `BTreeMap`
//! for deterministic iteration ordering.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::symbol::{EnumClass, Symbol};

// ---------------------------------------------------------------------------
// RegistryEvent — structured audit record for initialization outcomes
// ---------------------------------------------------------------------------

/// Structured event emitted when a type's constant set is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// Canonical identifier of the enumeration type involved.
    pub type_name: String,
    /// Event type.
    pub event: String,
    /// Outcome: "success" or "configuration_error".
    pub outcome: String,
    /// Constant count on success, failure reason otherwise.
    pub detail: String,
}

// ---------------------------------------------------------------------------
// TypeEntry — the populated constant set of one enumeration type
// ---------------------------------------------------------------------------

/// Fully populated constant set for one enumeration type.
///
/// `symbols` holds a `Vec<&'static Symbol<T>>` behind `dyn Any`; the typed
/// accessors downcast it back.  `by_name` is kept erased so diagnostics and
/// cross-type comparison can resolve ordinals without knowing `T`.
struct TypeEntry {
    type_name: &'static str,
    by_name: BTreeMap<&'static str, usize>,
    symbols: Box<dyn Any + Send + Sync>,
}

struct RegistryState {
    /// Cached population outcome per type.  A failed outcome stays failed.
    types: BTreeMap<TypeId, Result<TypeEntry, EnumError>>,
    events: Vec<RegistryEvent>,
    event_counts: BTreeMap<String, u64>,
}

static REGISTRY: Lazy<RwLock<RegistryState>> = Lazy::new(|| {
    RwLock::new(RegistryState {
        types: BTreeMap::new(),
        events: Vec::new(),
        event_counts: BTreeMap::new(),
    })
});

// ---------------------------------------------------------------------------
// Population
// ---------------------------------------------------------------------------

/// Populate the constant set of `T`.
///
/// Invoked lazily by [`value_of`] and [`values`]; calling it explicitly at
/// process start gives the eager-init discipline described in the module
/// docs.  A second call is a no-op that returns the cached outcome, so a
/// declaration error keeps failing with the same `Configuration` error.
pub fn initialize<T: EnumClass>() -> Result<(), EnumError> {
    ensure::<T>()
}

fn ensure<T: EnumClass>() -> Result<(), EnumError> {
    let id = TypeId::of::<T>();
    {
        let state = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
        if let Some(outcome) = state.types.get(&id) {
            return outcome.as_ref().map(|_| ()).map_err(Clone::clone);
        }
    }

    let mut state = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    // Another thread may have populated between the read and write lock.
    if let Some(outcome) = state.types.get(&id) {
        return outcome.as_ref().map(|_| ()).map_err(Clone::clone);
    }

    let built = build_entry::<T>();
    let (outcome, event) = match &built {
        Ok(entry) => (
            "initialize_success",
            RegistryEvent {
                type_name: T::type_name().to_string(),
                event: "initialize".to_string(),
                outcome: "success".to_string(),
                detail: format!("{} constants", entry.by_name.len()),
            },
        ),
        Err(err) => (
            "initialize_failed",
            RegistryEvent {
                type_name: T::type_name().to_string(),
                event: "initialize".to_string(),
                outcome: "configuration_error".to_string(),
                detail: err.to_string(),
            },
        ),
    };
    state.events.push(event);
    *state
        .event_counts
        .entry(outcome.to_string())
        .or_insert(0) += 1;

    let result = built.as_ref().map(|_| ()).map_err(Clone::clone);
    state.types.insert(id, built);
    result
}

/// Walk the declaration in order and construct every constant, or fail
/// without leaving anything behind.
fn build_entry<T: EnumClass>() -> Result<TypeEntry, EnumError> {
    let declaration = T::declaration();
    let mut by_name = BTreeMap::new();
    let mut symbols: Vec<&'static Symbol<T>> = Vec::with_capacity(declaration.len());

    for (ordinal, (name, args)) in declaration.into_iter().enumerate() {
        if name.is_empty() {
            return Err(EnumError::Configuration {
                type_name: T::type_name().to_string(),
                reason: format!("constant at ordinal {ordinal} has an empty name"),
            });
        }
        if by_name.contains_key(name) {
            return Err(EnumError::Configuration {
                type_name: T::type_name().to_string(),
                reason: format!("duplicate constant name '{name}'"),
            });
        }
        let payload = T::construct(name, &args)?;
        let symbol: &'static Symbol<T> = Box::leak(Box::new(Symbol::new(name, ordinal, payload)));
        by_name.insert(name, ordinal);
        symbols.push(symbol);
    }

    Ok(TypeEntry {
        type_name: T::type_name(),
        by_name,
        symbols: Box::new(symbols),
    })
}

// ---------------------------------------------------------------------------
// Lookup and listing
// ---------------------------------------------------------------------------

/// The singleton constant of `T` with the given name.
pub fn value_of<T: EnumClass>(name: &str) -> Result<&'static Symbol<T>, EnumError> {
    ensure::<T>()?;
    let state = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    let entry = populated_entry::<T>(&state)?;
    let ordinal = *entry
        .by_name
        .get(name)
        .ok_or_else(|| EnumError::UnknownName {
            type_name: T::type_name().to_string(),
            name: name.to_string(),
        })?;
    let symbols = typed_symbols::<T>(entry)?;
    Ok(symbols[ordinal])
}

/// All constants of `T` in declaration (ordinal) order.
///
/// Snapshot semantics: the returned `Vec` is fresh on every call, so
/// mutating it cannot affect the registry.
pub fn values<T: EnumClass>() -> Result<Vec<&'static Symbol<T>>, EnumError> {
    ensure::<T>()?;
    let state = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    let entry = populated_entry::<T>(&state)?;
    Ok(typed_symbols::<T>(entry)?.clone())
}

/// Canonical type identifier used for type-equality checks.
pub fn class_name<T: EnumClass>() -> &'static str {
    T::type_name()
}

/// Erased ordinal lookup by `(type identifier, name)`.
///
/// Serves cross-type comparison and diagnostics.  The type must already be
/// populated: an erased identifier cannot trigger lazy initialization.
pub fn ordinal_of(type_name: &str, name: &str) -> Result<usize, EnumError> {
    let state = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    let entry = state
        .types
        .values()
        .filter_map(|outcome| outcome.as_ref().ok())
        .find(|entry| entry.type_name == type_name)
        .ok_or_else(|| EnumError::UnknownType {
            type_name: type_name.to_string(),
        })?;
    entry
        .by_name
        .get(name)
        .copied()
        .ok_or_else(|| EnumError::UnknownName {
            type_name: type_name.to_string(),
            name: name.to_string(),
        })
}

fn populated_entry<'a, T: EnumClass>(
    state: &'a RegistryState,
) -> Result<&'a TypeEntry, EnumError> {
    match state.types.get(&TypeId::of::<T>()) {
        Some(Ok(entry)) => Ok(entry),
        Some(Err(err)) => Err(err.clone()),
        None => Err(EnumError::UnknownType {
            type_name: T::type_name().to_string(),
        }),
    }
}

fn typed_symbols<T: EnumClass>(entry: &TypeEntry) -> Result<&Vec<&'static Symbol<T>>, EnumError> {
    entry
        .symbols
        .downcast_ref::<Vec<&'static Symbol<T>>>()
        .ok_or_else(|| EnumError::IllegalState {
            reason: format!("constant set of '{}' has an unexpected shape", entry.type_name),
        })
}

// ---------------------------------------------------------------------------
// Audit events
// ---------------------------------------------------------------------------

/// Drain accumulated initialization events.
pub fn drain_events() -> Vec<RegistryEvent> {
    let mut state = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    std::mem::take(&mut state.events)
}

/// Per-event-type counters (deterministic ordering).
pub fn event_counts() -> BTreeMap<String, u64> {
    let state = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    state.event_counts.clone()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::ArgValue;

    // -- Test declarations --

    struct Fruit {
        rank: i64,
    }

    impl EnumClass for Fruit {
        fn type_name() -> &'static str {
            "registry::tests::Fruit"
        }

        fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
            vec![
                ("APPLE", vec![ArgValue::Int(1)]),
                ("PEAR", vec![ArgValue::Int(2)]),
                ("PLUM", vec![ArgValue::Int(3)]),
            ]
        }

        fn construct(name: &str, args: &[ArgValue]) -> Result<Self, EnumError> {
            let rank = match args.first() {
                Some(ArgValue::Int(v)) => *v,
                _ => {
                    return Err(EnumError::Configuration {
                        type_name: Self::type_name().to_string(),
                        reason: format!("constant '{name}' requires an integer rank"),
                    })
                }
            };
            Ok(Fruit { rank })
        }
    }

    struct Hollow;

    impl EnumClass for Hollow {
        fn type_name() -> &'static str {
            "registry::tests::Hollow"
        }

        fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
            Vec::new()
        }

        fn construct(_name: &str, _args: &[ArgValue]) -> Result<Self, EnumError> {
            Ok(Hollow)
        }
    }

    struct Starving;

    impl EnumClass for Starving {
        fn type_name() -> &'static str {
            "registry::tests::Starving"
        }

        fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
            vec![("ITEM", Vec::new())]
        }

        fn construct(name: &str, args: &[ArgValue]) -> Result<Self, EnumError> {
            if args.is_empty() {
                return Err(EnumError::Configuration {
                    type_name: Self::type_name().to_string(),
                    reason: format!("constant '{name}' requires at least one argument"),
                });
            }
            Ok(Starving)
        }
    }

    struct Twins;

    impl EnumClass for Twins {
        fn type_name() -> &'static str {
            "registry::tests::Twins"
        }

        fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
            vec![("SAME", Vec::new()), ("SAME", Vec::new())]
        }

        fn construct(_name: &str, _args: &[ArgValue]) -> Result<Self, EnumError> {
            Ok(Twins)
        }
    }

    struct Nameless;

    impl EnumClass for Nameless {
        fn type_name() -> &'static str {
            "registry::tests::Nameless"
        }

        fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
            vec![("", Vec::new())]
        }

        fn construct(_name: &str, _args: &[ArgValue]) -> Result<Self, EnumError> {
            Ok(Nameless)
        }
    }

    // -- Population and lookup --

    #[test]
    fn values_follow_declaration_order() {
        let fruits = values::<Fruit>().unwrap();
        assert_eq!(fruits.len(), 3);
        for (i, fruit) in fruits.iter().enumerate() {
            assert_eq!(fruit.ordinal(), i);
        }
        assert_eq!(fruits[0].name(), "APPLE");
        assert_eq!(fruits[2].name(), "PLUM");
    }

    #[test]
    fn value_of_returns_the_singleton() {
        let fruits = values::<Fruit>().unwrap();
        let pear = value_of::<Fruit>("PEAR").unwrap();
        assert!(std::ptr::eq(pear, fruits[1]));
        assert_eq!(pear.get().rank, 2);
    }

    #[test]
    fn value_of_unknown_name_fails() {
        assert!(matches!(
            value_of::<Fruit>("DURIAN"),
            Err(EnumError::UnknownName { .. })
        ));
    }

    #[test]
    fn empty_declaration_is_legal() {
        assert!(values::<Hollow>().unwrap().is_empty());
    }

    #[test]
    fn values_is_a_snapshot() {
        let mut fruits = values::<Fruit>().unwrap();
        fruits.clear();
        assert_eq!(values::<Fruit>().unwrap().len(), 3);
    }

    #[test]
    fn repeated_initialize_is_a_noop() {
        initialize::<Fruit>().unwrap();
        initialize::<Fruit>().unwrap();
        assert_eq!(values::<Fruit>().unwrap().len(), 3);
    }

    // -- Declaration errors --

    #[test]
    fn missing_constructor_arguments_abort_the_type() {
        let first = initialize::<Starving>();
        assert!(matches!(first, Err(EnumError::Configuration { .. })));
        // A retry fails identically from the cached outcome.
        assert_eq!(initialize::<Starving>(), first);
        assert!(values::<Starving>().is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        assert!(matches!(
            initialize::<Twins>(),
            Err(EnumError::Configuration { .. })
        ));
    }

    #[test]
    fn empty_names_rejected() {
        assert!(matches!(
            initialize::<Nameless>(),
            Err(EnumError::Configuration { .. })
        ));
    }

    // -- Erased lookup --

    #[test]
    fn ordinal_of_resolves_populated_types() {
        initialize::<Fruit>().unwrap();
        assert_eq!(ordinal_of("registry::tests::Fruit", "PLUM").unwrap(), 2);
        assert!(matches!(
            ordinal_of("registry::tests::Fruit", "DURIAN"),
            Err(EnumError::UnknownName { .. })
        ));
        assert!(matches!(
            ordinal_of("registry::tests::NeverSeen", "X"),
            Err(EnumError::UnknownType { .. })
        ));
    }

    #[test]
    fn class_name_is_the_declared_identifier() {
        assert_eq!(class_name::<Fruit>(), "registry::tests::Fruit");
    }

    // -- Audit events --

    #[test]
    fn initialization_is_audited() {
        initialize::<Fruit>().unwrap();
        let counts = event_counts();
        assert!(counts.get("initialize_success").copied().unwrap_or(0) >= 1);
    }
}
