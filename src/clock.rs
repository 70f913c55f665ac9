use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A write timestamp issued by a [`RecencyClock`]
///
/// Stamps only carry ordering: a later write always holds a greater stamp than
/// an earlier one from the same clock. [`Stamp::NEVER`] marks a record that has
/// not been written yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stamp(u64);

impl Stamp {
    /// The stamp of a record that has never been written
    pub const NEVER: Stamp = Stamp(0);

    /// Returns the raw sequence value
    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns true if this is [`Stamp::NEVER`]
    pub fn is_never(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source of strictly increasing [`Stamp`]s
///
/// Containers are stamped through this trait so callers can isolate an ordering
/// domain from the process-wide one. All writes to a given container must come
/// from the same clock, otherwise recency comparisons between its records mean
/// nothing.
pub trait Clock {
    /// Issues a stamp greater than every stamp this clock issued before
    fn tick(&self) -> Stamp;
}

/// A lock-free monotonic sequence generator
///
/// `tick` may be called from any number of threads at once. The clock only
/// grows; there is no reset.
///
/// # Examples
///
/// ```
/// use sovran_variant::RecencyClock;
///
/// static DOMAIN: RecencyClock = RecencyClock::new();
///
/// let first = DOMAIN.tick();
/// let second = DOMAIN.tick();
/// assert!(second > first);
/// assert_eq!(DOMAIN.last(), second);
/// ```
#[derive(Debug, Default)]
pub struct RecencyClock {
    counter: AtomicU64,
}

impl RecencyClock {
    /// Creates a clock whose first tick is `#1`
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Issues the next stamp
    pub fn tick(&self) -> Stamp {
        // A single RMW location has one total modification order, so Relaxed
        // is enough for uniqueness and per-thread monotonicity.
        Stamp(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Returns the most recently issued stamp, or [`Stamp::NEVER`] if none
    pub fn last(&self) -> Stamp {
        Stamp(self.counter.load(Ordering::Relaxed))
    }
}

impl Clock for RecencyClock {
    fn tick(&self) -> Stamp {
        RecencyClock::tick(self)
    }
}

static GLOBAL: RecencyClock = RecencyClock::new();

/// Returns the process-wide clock
pub fn global() -> &'static RecencyClock {
    &GLOBAL
}

/// Ticks the process-wide clock
pub fn next() -> Stamp {
    GLOBAL.tick()
}

/// Zero-sized handle to the process-wide clock
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalClock;

impl Clock for GlobalClock {
    fn tick(&self) -> Stamp {
        next()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn tick(&self) -> Stamp {
        (**self).tick()
    }
}
