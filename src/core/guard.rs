//! Guard predicates for controlling check-in requests.
//!
//! Guards are pure boolean functions that decide whether a request may
//! proceed. They enable declarative rules without side effects.

use std::fmt;

/// Pure predicate over a value of type `T`.
///
/// Guards are evaluated before a state change. They encapsulate
/// pre-conditions as pure functions, keeping the tracker core free of
/// ad hoc branching.
///
/// # Example
///
/// ```rust
/// use visitlog::core::Guard;
///
/// let not_blank = Guard::new(|name: &str| !name.trim().is_empty());
///
/// assert!(not_blank.check("Alice"));
/// assert!(!not_blank.check("   "));
/// ```
pub struct Guard<T: ?Sized> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// Guard that passes only when both guards pass.
    pub fn and(self, other: Guard<T>) -> Self
    where
        T: 'static,
    {
        Guard::new(move |value: &T| self.check(value) && other.check(value))
    }

    /// Guard that passes when this guard fails.
    pub fn negate(self) -> Self
    where
        T: 'static,
    {
        Guard::new(move |value: &T| !self.check(value))
    }
}

impl<T: ?Sized> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
