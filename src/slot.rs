use std::fmt;

/// Lazily heap-allocated storage for a single value of type `T`
///
/// A slot starts out without an allocation. The first write allocates, and
/// every later write overwrites that same allocation in place; only
/// [`Slot::reset`], [`Slot::take`] or dropping the slot releases it. Because the
/// value always lives behind a pointer, a slot has a fixed size no matter how
/// large `T` is, which is what lets a type hold slots of itself.
///
/// # Examples
///
/// ```
/// use sovran_variant::Slot;
///
/// let mut slot = Slot::empty();
/// assert!(!slot.is_present());
///
/// slot.assign(String::from("first"));
/// slot.assign(String::from("second"));
/// assert_eq!(slot.get().map(String::as_str), Some("second"));
///
/// slot.reset();
/// assert_eq!(slot.get(), None);
/// ```
pub struct Slot<T> {
    storage: Option<Box<T>>,
}

impl<T> Slot<T> {
    /// Creates a slot with no allocation
    pub const fn empty() -> Self {
        Self { storage: None }
    }

    /// Creates a slot holding `value`
    pub fn new(value: T) -> Self {
        Self {
            storage: Some(Box::new(value)),
        }
    }

    /// Stores `value`, reusing the existing allocation if there is one
    pub fn assign(&mut self, value: T) {
        match self.storage.as_deref_mut() {
            Some(current) => *current = value,
            None => self.storage = Some(Box::new(value)),
        }
    }

    /// Returns true if the slot holds an allocation
    pub fn is_present(&self) -> bool {
        self.storage.is_some()
    }

    /// Returns the stored value, or `None` if the slot is empty
    pub fn get(&self) -> Option<&T> {
        self.storage.as_deref()
    }

    /// Returns the stored value mutably, or `None` if the slot is empty
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.storage.as_deref_mut()
    }

    /// Returns the stored value, allocating `T::default()` first if the slot is empty
    pub fn get_or_create(&mut self) -> &mut T
    where
        T: Default,
    {
        self.storage.get_or_insert_with(Box::default)
    }

    /// Releases the allocation, leaving the slot empty
    pub fn reset(&mut self) {
        self.storage = None;
    }

    /// Moves the allocation out, leaving this slot empty
    pub fn take(&mut self) -> Slot<T> {
        Slot {
            storage: self.storage.take(),
        }
    }

    /// Consumes the slot, returning the stored value if present
    pub fn into_inner(self) -> Option<T> {
        self.storage.map(|boxed| *boxed)
    }

    /// Returns the address of the current allocation
    ///
    /// Two calls return the same pointer as long as the slot was only
    /// assigned to in between.
    pub fn as_ptr(&self) -> Option<*const T> {
        self.storage.as_deref().map(|value| value as *const T)
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match source.get() {
            Some(value) => match self.storage.as_deref_mut() {
                Some(current) => current.clone_from(value),
                None => self.storage = Some(Box::new(value.clone())),
            },
            None => self.reset(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Slot").field(value).finish(),
            None => f.write_str("Slot(<empty>)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq> Eq for Slot<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_allocation() {
        let slot: Slot<i32> = Slot::empty();
        assert!(!slot.is_present());
        assert_eq!(slot.get(), None);
        assert_eq!(slot.as_ptr(), None);

        let slot: Slot<i32> = Slot::default();
        assert!(!slot.is_present());
    }

    #[test]
    fn test_assign_allocates_once() {
        let mut slot = Slot::empty();
        slot.assign(vec![1, 2, 3]);
        let first = slot.as_ptr();
        assert!(first.is_some());

        slot.assign(vec![4]);
        slot.assign(vec![5, 6]);
        assert_eq!(slot.as_ptr(), first);
        assert_eq!(slot.get(), Some(&vec![5, 6]));
    }

    #[test]
    fn test_get_or_create_defaults_when_empty() {
        let mut slot: Slot<String> = Slot::empty();
        slot.get_or_create().push_str("built");
        assert_eq!(slot.get().map(String::as_str), Some("built"));

        // Existing value is returned untouched
        slot.get_or_create().push('!');
        assert_eq!(slot.get().map(String::as_str), Some("built!"));
    }

    #[test]
    fn test_reset_releases_storage() {
        let mut slot = Slot::new(7u8);
        slot.reset();
        assert!(!slot.is_present());

        slot.assign(8);
        assert_eq!(slot.get(), Some(&8));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Slot::new(vec![1, 2]);
        let mut copy = original.clone();
        copy.get_mut().unwrap().push(3);

        assert_eq!(original.get(), Some(&vec![1, 2]));
        assert_eq!(copy.get(), Some(&vec![1, 2, 3]));
        assert_ne!(original.as_ptr(), copy.as_ptr());

        let empty: Slot<Vec<i32>> = Slot::empty();
        assert!(!empty.clone().is_present());
    }

    #[test]
    fn test_clone_from_reuses_or_clears() {
        let mut target = Slot::new(String::from("old"));
        let before = target.as_ptr();

        target.clone_from(&Slot::new(String::from("new")));
        assert_eq!(target.as_ptr(), before);
        assert_eq!(target.get().map(String::as_str), Some("new"));

        target.clone_from(&Slot::empty());
        assert!(!target.is_present());
    }

    #[test]
    fn test_take_moves_allocation() {
        let mut source = Slot::new(42);
        let address = source.as_ptr();

        let moved = source.take();
        assert!(!source.is_present());
        assert_eq!(moved.as_ptr(), address);
        assert_eq!(moved.into_inner(), Some(42));
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", Slot::new(3)), "Slot(3)");
        assert_eq!(format!("{:?}", Slot::<i32>::empty()), "Slot(<empty>)");
    }
}
