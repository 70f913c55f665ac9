use crate::clock::{Clock, GlobalClock, Stamp};
use crate::error::VariantError;
use crate::slot::Slot;
use crate::visit::{Dispatch, Handle, Visitor};
use std::fmt;

/// Storage for one alternative: its lazy slot and the stamp of its last write
pub struct Record<T> {
    slot: Slot<T>,
    stamp: Stamp,
}

impl<T> Record<T> {
    /// Returns the stamp of the last write, or [`Stamp::NEVER`]
    pub fn stamp(&self) -> Stamp {
        self.stamp
    }

    /// Returns the retained value, whether or not this record is active
    pub fn value(&self) -> Option<&T> {
        self.slot.get()
    }

    fn write(&mut self, stamp: Stamp, value: T) {
        self.stamp = stamp;
        self.slot.assign(value);
    }
}

impl<T> Default for Record<T> {
    fn default() -> Self {
        Self {
            slot: Slot::empty(),
            stamp: Stamp::NEVER,
        }
    }
}

impl<T: Clone> Clone for Record<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            stamp: self.stamp,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slot.clone_from(&source.slot);
        self.stamp = source.stamp;
    }
}

impl<T: fmt::Debug> fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("stamp", &self.stamp)
            .field("slot", &self.slot)
            .finish()
    }
}

/// A list of alternative types, written as a tuple such as `(i32, bool)`
pub trait Alternatives {
    /// One [`Record`] per alternative, in declaration order
    type Records: Default;

    /// Number of alternatives
    const COUNT: usize;

    /// Returns the stamp of record `index`, or [`Stamp::NEVER`] if out of range
    fn stamp(records: &Self::Records, index: usize) -> Stamp;
}

/// Alternative lists whose types are all `Clone`
///
/// Cloning goes record by record so that `clone_from` can copy into the
/// allocations the destination already holds.
pub trait CloneAlternatives: Alternatives {
    fn clone_records(records: &Self::Records) -> Self::Records;

    fn clone_records_from(target: &mut Self::Records, source: &Self::Records);
}

/// Compile-time selection of the alternative at position `I`
pub trait Select<const I: usize>: Alternatives {
    /// The type of alternative `I`
    type Item;

    fn record(records: &Self::Records) -> &Record<Self::Item>;

    fn record_mut(records: &mut Self::Records) -> &mut Record<Self::Item>;
}

macro_rules! select_impl {
    ([$($all:ident),+]; $idx:tt $T:ident) => {
        impl<$($all),+> Select<$idx> for ($($all,)+) {
            type Item = $T;

            fn record(records: &<Self as Alternatives>::Records) -> &Record<$T> {
                &records.$idx
            }

            fn record_mut(records: &mut <Self as Alternatives>::Records) -> &mut Record<$T> {
                &mut records.$idx
            }
        }
    };
}

macro_rules! alternatives_impl {
    ($count:expr; $all:tt; $($idx:tt $T:ident),+) => {
        impl<$($T),+> Alternatives for ($($T,)+) {
            type Records = ($(Record<$T>,)+);

            const COUNT: usize = $count;

            fn stamp(records: &Self::Records, index: usize) -> Stamp {
                match index {
                    $($idx => records.$idx.stamp,)+
                    _ => Stamp::NEVER,
                }
            }
        }

        impl<V, $($T),+> Dispatch<V> for ($($T,)+)
        where
            V: $(Handle<$T> +)+ Visitor,
        {
            fn dispatch(
                records: &<Self as Alternatives>::Records,
                index: usize,
                visitor: &mut V,
            ) -> Option<V::Result> {
                match index {
                    $($idx => records.$idx.slot.get().map(|value| <V as Handle<$T>>::handle(visitor, value)),)+
                    _ => None,
                }
            }
        }

        impl<$($T: Clone),+> CloneAlternatives for ($($T,)+) {
            fn clone_records(
                records: &<Self as Alternatives>::Records,
            ) -> <Self as Alternatives>::Records {
                ($(records.$idx.clone(),)+)
            }

            fn clone_records_from(
                target: &mut <Self as Alternatives>::Records,
                source: &<Self as Alternatives>::Records,
            ) {
                $(target.$idx.clone_from(&source.$idx);)+
            }
        }

        $(select_impl!($all; $idx $T);)+
    };
}

alternatives_impl!(1; [A]; 0 A);
alternatives_impl!(2; [A, B]; 0 A, 1 B);
alternatives_impl!(3; [A, B, C]; 0 A, 1 B, 2 C);
alternatives_impl!(4; [A, B, C, D]; 0 A, 1 B, 2 C, 3 D);
alternatives_impl!(5; [A, B, C, D, E]; 0 A, 1 B, 2 C, 3 D, 4 E);
alternatives_impl!(6; [A, B, C, D, E, F]; 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
alternatives_impl!(7; [A, B, C, D, E, F, G]; 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
alternatives_impl!(8; [A, B, C, D, E, F, G, H]; 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);

/// A value holding one of the alternatives listed in `L`
///
/// Every alternative gets its own lazily allocated [`Slot`] and a [`Stamp`].
/// Writing alternative `I` stamps it with a fresh tick and fills its slot;
/// nothing else is touched. The active alternative is simply the record with
/// the greatest stamp, found by a linear scan. Storage of alternatives that
/// were active earlier stays allocated (see [`OneOf::retained`]), so switching
/// back and forth between the same alternatives does not reallocate.
///
/// Alternatives are addressed by position, so the same type may appear more
/// than once in `L`.
///
/// # Examples
///
/// ```
/// use sovran_variant::{OneOf, VariantError};
///
/// let mut value = OneOf::<(i32, bool)>::of::<0>(11);
/// assert_eq!(value.active(), Some(0));
/// assert_eq!(value.get::<0>(), Some(&11));
///
/// value.set::<1>(true);
/// assert_eq!(value.active(), Some(1));
/// assert_eq!(value.get::<0>(), None);
/// assert_eq!(value.retained::<0>(), Some(&11));
///
/// let empty = OneOf::<(i32, bool)>::new();
/// assert_eq!(empty.with::<0, _, _>(|n| *n), Err(VariantError::NoActiveAlternative));
/// ```
pub struct OneOf<L: Alternatives> {
    records: L::Records,
}

impl<L: Alternatives> OneOf<L> {
    /// Creates a container with no active alternative
    pub fn new() -> Self {
        Self {
            records: L::Records::default(),
        }
    }

    /// Creates a container with alternative `I` written
    pub fn of<const I: usize>(value: <L as Select<I>>::Item) -> Self
    where
        L: Select<I>,
    {
        let mut container = Self::new();
        container.set::<I>(value);
        container
    }

    /// Writes alternative `I`, stamping it with the process-wide clock
    pub fn set<const I: usize>(&mut self, value: <L as Select<I>>::Item)
    where
        L: Select<I>,
    {
        self.set_with::<I, _>(&GlobalClock, value);
    }

    /// Writes alternative `I`, stamping it with `clock`
    ///
    /// Every write to one container must use the same clock.
    pub fn set_with<const I: usize, C: Clock>(&mut self, clock: &C, value: <L as Select<I>>::Item)
    where
        L: Select<I>,
    {
        let stamp = clock.tick();
        tracing::trace!(alternative = I, stamp = stamp.get(), "writing alternative");
        L::record_mut(&mut self.records).write(stamp, value);
    }

    /// Returns the index of the active alternative, or `None` if nothing was written
    pub fn active(&self) -> Option<usize> {
        let mut latest = Stamp::NEVER;
        let mut index = None;
        for i in 0..L::COUNT {
            let stamp = L::stamp(&self.records, i);
            if stamp > latest {
                latest = stamp;
                index = Some(i);
            }
        }
        index
    }

    /// Returns true if no alternative was ever written
    pub fn is_empty(&self) -> bool {
        self.active().is_none()
    }

    /// Returns true if alternative `I` is the active one
    pub fn is_active<const I: usize>(&self) -> bool
    where
        L: Select<I>,
    {
        self.active() == Some(I)
    }

    /// Returns the stamp of the last write to alternative `I`
    pub fn stamp<const I: usize>(&self) -> Stamp
    where
        L: Select<I>,
    {
        L::record(&self.records).stamp
    }

    /// Returns alternative `I`'s value if it is the active one
    pub fn get<const I: usize>(&self) -> Option<&<L as Select<I>>::Item>
    where
        L: Select<I>,
    {
        if self.is_active::<I>() {
            L::record(&self.records).slot.get()
        } else {
            None
        }
    }

    /// Returns alternative `I`'s value mutably if it is the active one
    ///
    /// Mutating through the reference does not restamp the record.
    pub fn get_mut<const I: usize>(&mut self) -> Option<&mut <L as Select<I>>::Item>
    where
        L: Select<I>,
    {
        if self.is_active::<I>() {
            L::record_mut(&mut self.records).slot.get_mut()
        } else {
            None
        }
    }

    /// Returns the value retained for alternative `I`, active or not
    pub fn retained<const I: usize>(&self) -> Option<&<L as Select<I>>::Item>
    where
        L: Select<I>,
    {
        L::record(&self.records).slot.get()
    }

    /// Returns the record backing alternative `I`
    pub fn record<const I: usize>(&self) -> &Record<<L as Select<I>>::Item>
    where
        L: Select<I>,
    {
        L::record(&self.records)
    }

    /// Runs `f` on alternative `I` if it is the active one
    ///
    /// # Errors
    ///
    /// - Returns `VariantError::NoActiveAlternative` if nothing was ever written
    /// - Returns `VariantError::InactiveAlternative` if another alternative is active
    pub fn with<const I: usize, F, R>(&self, f: F) -> Result<R, VariantError>
    where
        L: Select<I>,
        F: FnOnce(&<L as Select<I>>::Item) -> R,
    {
        match self.active() {
            None => Err(VariantError::NoActiveAlternative),
            Some(active) if active != I => Err(VariantError::InactiveAlternative {
                requested: I,
                active,
            }),
            Some(_) => L::record(&self.records)
                .slot
                .get()
                .map(f)
                .ok_or(VariantError::NoActiveAlternative),
        }
    }

    /// Invokes the visitor's handler for the active alternative
    ///
    /// # Errors
    ///
    /// Returns `VariantError::NoActiveAlternative` if nothing was ever written.
    pub fn visit<V>(&self, visitor: &mut V) -> Result<V::Result, VariantError>
    where
        V: Visitor,
        L: Dispatch<V>,
    {
        let result = self
            .active()
            .and_then(|index| L::dispatch(&self.records, index, visitor));
        if result.is_none() {
            tracing::debug!(alternatives = L::COUNT, "visit without an active alternative");
        }
        result.ok_or(VariantError::NoActiveAlternative)
    }

    /// Moves every record out, leaving this container as if freshly created
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<L: Alternatives> Default for OneOf<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: CloneAlternatives> Clone for OneOf<L> {
    fn clone(&self) -> Self {
        Self {
            records: L::clone_records(&self.records),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        L::clone_records_from(&mut self.records, &source.records);
    }
}

impl<L> fmt::Debug for OneOf<L>
where
    L: Alternatives,
    L::Records: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OneOf")
            .field("active", &self.active())
            .field("records", &self.records)
            .finish()
    }
}
