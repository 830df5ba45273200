//! Configuration
//!
//! Set growth parameters and the fast-mode switch.

/// Slots reserved by the first insert into a set
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

/// Largest number of slots added by a single growth step
pub const DEFAULT_MAX_GROWTH: usize = 1000;

/// Whether defensive validation is compiled in.
///
/// Building with the `fast-math` feature turns off bounds, dimension and
/// finiteness pre-checks. Slice indexing is still checked by Rust itself, so a
/// bad index panics instead of being reported as an error.
#[inline]
pub const fn checks_enabled() -> bool {
    !cfg!(feature = "fast-math")
}

/// Set storage configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetConfig {
    /// Slots reserved when the dimension is fixed by the first insert
    initial_capacity: usize,

    /// Cap on the slots added when a full set grows (growth doubles up to this)
    max_growth: usize,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_growth: DEFAULT_MAX_GROWTH,
        }
    }
}

impl SetConfig {
    /// Set the initial capacity (at least one slot)
    pub fn with_initial_capacity(mut self, slots: usize) -> Self {
        self.initial_capacity = slots.max(1);
        self
    }

    /// Set the growth cap (at least one slot)
    pub fn with_max_growth(mut self, slots: usize) -> Self {
        self.max_growth = slots.max(1);
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_growth(&self) -> usize {
        self.max_growth
    }

    /// Capacity after growing a full set of `capacity` slots.
    ///
    /// Always adds at least one slot.
    pub fn grown_capacity(&self, capacity: usize) -> usize {
        if capacity == 0 {
            return self.initial_capacity.max(1);
        }
        capacity.saturating_add(capacity.min(self.max_growth).max(1))
    }
}
