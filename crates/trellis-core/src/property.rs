//! Reactive property cells.
//!
//! A [`Property<T>`] stores a value behind a read-write lock and reports
//! whether a `set` actually changed it. Owners pair a property with a
//! [`Signal`](crate::Signal) and emit only when `set` returns `true`.
//!
//! ```
//! use trellis_core::Property;
//!
//! let index = Property::new(0usize);
//! assert!(index.set(2));
//! assert!(!index.set(2));
//! assert_eq!(index.get(), 2);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Store a value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the previous value.
    pub fn set(&self, value: T) -> bool {
        let mut guard = self.value.write();
        if *guard == value {
            return false;
        }
        tracing::trace!(target: "trellis_core::property", "property changed");
        *guard = value;
        true
    }

    /// Store `value`, returning the previous value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut guard = self.value.write();
        if *guard == value {
            None
        } else {
            Some(std::mem::replace(&mut *guard, value))
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
