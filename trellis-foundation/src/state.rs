//! Shared mutable state cells.
//!
//! [`State`] lets a component own a piece of mutable state while handing
//! clones of the handle to callbacks that run behind shared references
//! (layout listeners, host adapters). Reads and writes go through a
//! [`parking_lot::RwLock`]; two handles are equal when they point at the
//! same cell.

use std::sync::Arc;

use parking_lot::RwLock;

/// Handle to a shared state cell.
///
/// `State<T>` is `Clone + Send + Sync` (for `T: Send + Sync`) and
/// provides `with`, `with_mut`, `get` and `set` to read or update the
/// stored value.
///
/// # Examples
///
/// ```
/// use trellis_foundation::State;
///
/// let count = State::new(0usize);
/// count.with_mut(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> State<T> {
    /// Creates a new state cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a cloned value. Requires `T: Clone`.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for State<T> {}
