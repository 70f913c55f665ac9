use crate::slot::Slot;
use crate::visit::Handle;
use std::fmt;

/// A value that may be absent, stored behind a lazily allocated [`Slot`]
///
/// Unlike [`Option<T>`], an `Optional<T>` is always pointer-sized, so a type
/// can contain an `Optional` of itself. Once allocated, the storage is reused
/// by every later [`set`](Optional::set) until [`reset`](Optional::reset).
///
/// # Examples
///
/// ```
/// use sovran_variant::Optional;
///
/// struct Node {
///     label: &'static str,
///     next: Optional<Node>,
/// }
///
/// let tail = Node { label: "tail", next: Optional::new() };
/// let head = Node { label: "head", next: Optional::from(tail) };
///
/// assert_eq!(head.next.get().map(|n| n.label), Some("tail"));
/// assert!(head.next.get().unwrap().next.is_none());
/// ```
pub struct Optional<T> {
    slot: Slot<T>,
}

impl<T> Optional<T> {
    /// Creates an absent value
    pub const fn new() -> Self {
        Self { slot: Slot::empty() }
    }

    /// Stores `value`, reusing the existing allocation if there is one
    pub fn set(&mut self, value: T) {
        self.slot.assign(value);
    }

    /// Returns true if a value is present
    pub fn is_some(&self) -> bool {
        self.slot.is_present()
    }

    /// Returns true if no value is present
    pub fn is_none(&self) -> bool {
        !self.slot.is_present()
    }

    /// Returns the held value, or `None` if absent
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Returns the held value mutably, or `None` if absent
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.get_mut()
    }

    /// Returns the held value, storing `T::default()` first if absent
    pub fn get_or_create(&mut self) -> &mut T
    where
        T: Default,
    {
        self.slot.get_or_create()
    }

    /// Drops the held value and releases its storage
    pub fn reset(&mut self) {
        self.slot.reset();
    }

    /// Moves the held value out, leaving this one absent
    pub fn take(&mut self) -> Optional<T> {
        Optional {
            slot: self.slot.take(),
        }
    }

    /// Converts into a standard [`Option`]
    pub fn into_option(self) -> Option<T> {
        self.slot.into_inner()
    }

    /// Invokes the visitor's handler if a value is present
    ///
    /// Absence is not an error here: it simply yields `None`.
    pub fn visit<V>(&self, visitor: &mut V) -> Option<V::Result>
    where
        V: Handle<T>,
    {
        self.slot.get().map(|value| visitor.handle(value))
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self {
            slot: Slot::new(value),
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self {
                slot: Slot::new(value),
            },
            None => Self::new(),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slot.clone_from(&source.slot);
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            Some(value) => write!(f, "Optional(Some({:?}))", value),
            None => f.write_str("Optional(None)"),
        }
    }
}
