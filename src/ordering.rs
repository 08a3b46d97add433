//! Reusable total-order comparator objects.
//!
//! An [`Ordering`] wraps a two-argument comparison function into a value
//! that can be stored, cloned, and composed.  The wrapped function must
//! implement a total order: antisymmetric, transitive, and consistent with
//! equality for identity-typed values.
//!
//! The provided natural orderings compare relationally instead of
//! subtracting, so they behave correctly near the numeric domain's
//! boundary values.

use std::cmp;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::symbol::{EnumClass, Symbol};

/// A reusable, composable total order over `T`.
///
/// Stateless and cheap to clone; the comparison function is shared.
pub struct Ordering<T> {
    func: Arc<dyn Fn(&T, &T) -> cmp::Ordering + Send + Sync>,
}

impl<T> Clone for Ordering<T> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<T: 'static> Ordering<T> {
    /// Wrap a raw comparison function.
    ///
    /// `f(a, b)` must return `Less`/`Equal`/`Greater` consistent with
    /// `a < b` / `a == b` / `a > b`.
    pub fn from(f: impl Fn(&T, &T) -> cmp::Ordering + Send + Sync + 'static) -> Self {
        Self { func: Arc::new(f) }
    }

    /// The natural order of an `Ord` type.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::from(|a: &T, b: &T| a.cmp(b))
    }

    /// Delegate to the wrapped function.
    pub fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
        (self.func)(a, b)
    }

    /// The reverse of this ordering.
    pub fn reverse(&self) -> Self {
        let func = Arc::clone(&self.func);
        Self::from(move |a: &T, b: &T| func(b, a))
    }

    /// Compound ordering: fall back to `secondary` whenever this ordering
    /// considers two values equal.
    pub fn then(&self, secondary: &Ordering<T>) -> Self {
        let primary = Arc::clone(&self.func);
        let fallback = Arc::clone(&secondary.func);
        Self::from(move |a: &T, b: &T| primary(a, b).then_with(|| fallback(a, b)))
    }

    /// Order `S` values by a key extracted from them.
    pub fn on<S: 'static>(&self, key: impl Fn(&S) -> T + Send + Sync + 'static) -> Ordering<S> {
        let func = Arc::clone(&self.func);
        Ordering::from(move |a: &S, b: &S| func(&key(a), &key(b)))
    }

    /// Greatest element under this ordering, if any.
    pub fn max<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items
            .into_iter()
            .reduce(|best, item| match self.compare(item, best) {
                cmp::Ordering::Greater => item,
                _ => best,
            })
    }

    /// Least element under this ordering, if any.
    pub fn min<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items
            .into_iter()
            .reduce(|best, item| match self.compare(item, best) {
                cmp::Ordering::Less => item,
                _ => best,
            })
    }

    /// Whether the items appear in non-decreasing order.
    pub fn is_ordered<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        let mut iter = items.into_iter();
        let Some(mut prev) = iter.next() else {
            return true;
        };
        for item in iter {
            if self.compare(prev, item) == cmp::Ordering::Greater {
                return false;
            }
            prev = item;
        }
        true
    }

    /// A sorted copy of the input; the input itself is untouched.
    pub fn sorted_copy(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = items.to_vec();
        let func = Arc::clone(&self.func);
        out.sort_by(|a, b| func(a, b));
        out
    }
}

// ---------------------------------------------------------------------------
// Provided natural orderings
// ---------------------------------------------------------------------------

/// Natural order over `f64`, via `total_cmp`.
///
/// Relational comparison, not subtraction: a difference-based comparator
/// misbehaves near the boundary values of the domain.
pub fn numeric() -> Ordering<f64> {
    Ordering::from(|a: &f64, b: &f64| a.total_cmp(b))
}

/// Natural chronological order over UTC timestamps.
pub fn date() -> Ordering<DateTime<Utc>> {
    Ordering::from(|a: &DateTime<Utc>, b: &DateTime<Utc>| a.cmp(b))
}

/// Declaration order over the constants of an enumeration type.
pub fn ordinal_order<T: EnumClass>() -> Ordering<&'static Symbol<T>> {
    Ordering::from(|a: &&'static Symbol<T>, b: &&'static Symbol<T>| a.ordinal().cmp(&b.ordinal()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
