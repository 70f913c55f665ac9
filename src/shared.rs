use crate::error::VariantError;
use crate::one_of::{Alternatives, CloneAlternatives, OneOf, Select};
use crate::visit::{Dispatch, Visitor};
use std::sync::{Arc, Mutex};

/// A thread-safe handle to a [`OneOf`] container
///
/// `OneOf` itself does no synchronization, so concurrent writes to one
/// instance would race on its records. `SharedOneOf` puts the container behind
/// an `Arc<Mutex<_>>`: cloning the handle shares the same container, and every
/// operation holds the lock for its whole duration.
///
/// # Examples
///
/// ```
/// use sovran_variant::{SharedOneOf, VariantError};
/// use std::thread;
///
/// let shared = SharedOneOf::<(u32, String)>::new();
///
/// let writer = shared.clone();
/// thread::spawn(move || writer.set::<1>("from thread".to_string()))
///     .join()
///     .unwrap()?;
///
/// let text = shared.with::<1, _, _>(|s| s.clone())?;
/// assert_eq!(text, "from thread");
/// # Ok::<(), VariantError>(())
/// ```
pub struct SharedOneOf<L: Alternatives> {
    inner: Arc<Mutex<OneOf<L>>>,
}

impl<L: Alternatives> SharedOneOf<L> {
    /// Creates a handle to an empty container
    pub fn new() -> Self {
        Self::from_container(OneOf::new())
    }

    /// Wraps an existing container
    pub fn from_container(container: OneOf<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(container)),
        }
    }

    /// Writes alternative `I`
    ///
    /// # Errors
    ///
    /// Returns `VariantError::LockError` if the internal lock cannot be acquired.
    pub fn set<const I: usize>(&self, value: <L as Select<I>>::Item) -> Result<(), VariantError>
    where
        L: Select<I>,
    {
        let mut container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        container.set::<I>(value);
        Ok(())
    }

    /// Returns the index of the active alternative
    ///
    /// # Errors
    ///
    /// Returns `VariantError::LockError` if the internal lock cannot be acquired.
    pub fn active(&self) -> Result<Option<usize>, VariantError> {
        let container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        Ok(container.active())
    }

    /// Runs `f` on alternative `I` while holding the lock
    ///
    /// # Errors
    ///
    /// - Returns `VariantError::LockError` if the internal lock cannot be acquired
    /// - Returns `VariantError::NoActiveAlternative` if nothing was ever written
    /// - Returns `VariantError::InactiveAlternative` if another alternative is active
    pub fn with<const I: usize, F, R>(&self, f: F) -> Result<R, VariantError>
    where
        L: Select<I>,
        F: FnOnce(&<L as Select<I>>::Item) -> R,
    {
        let container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        container.with::<I, F, R>(f)
    }

    /// Runs `f` with write access to the whole container
    ///
    /// Useful for read-modify-write sequences that must not interleave with
    /// other writers.
    ///
    /// # Errors
    ///
    /// Returns `VariantError::LockError` if the internal lock cannot be acquired.
    pub fn with_mut<F, R>(&self, f: F) -> Result<R, VariantError>
    where
        F: FnOnce(&mut OneOf<L>) -> R,
    {
        let mut container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        Ok(f(&mut *container))
    }

    /// Visits the active alternative while holding the lock
    ///
    /// # Errors
    ///
    /// - Returns `VariantError::LockError` if the internal lock cannot be acquired
    /// - Returns `VariantError::NoActiveAlternative` if nothing was ever written
    pub fn visit<V>(&self, visitor: &mut V) -> Result<V::Result, VariantError>
    where
        V: Visitor,
        L: Dispatch<V>,
    {
        let container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        container.visit(visitor)
    }

    /// Returns a deep copy of the container
    ///
    /// # Errors
    ///
    /// Returns `VariantError::LockError` if the internal lock cannot be acquired.
    pub fn snapshot(&self) -> Result<OneOf<L>, VariantError>
    where
        L: CloneAlternatives,
    {
        let container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        Ok((*container).clone())
    }

    /// Swaps in `replacement`, returning the previous container
    ///
    /// # Errors
    ///
    /// Returns `VariantError::LockError` if the internal lock cannot be acquired.
    pub fn replace(&self, replacement: OneOf<L>) -> Result<OneOf<L>, VariantError> {
        let mut container = self.inner.lock().map_err(|_| VariantError::LockError)?;
        Ok(std::mem::replace(&mut *container, replacement))
    }
}

impl<L: Alternatives> Clone for SharedOneOf<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Alternatives> Default for SharedOneOf<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Alternatives> From<OneOf<L>> for SharedOneOf<L> {
    fn from(container: OneOf<L>) -> Self {
        Self::from_container(container)
    }
}
