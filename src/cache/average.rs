//! Running Average Module
//!
//! Incrementally maintained mean of the values currently held by the cache.

// == Running Average ==
/// Sum and count of live values, adjusted on every insert and eviction.
///
/// The sum is kept as an exact integer so that adding and later removing the
/// same value always returns the accumulator to its previous state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningAverage {
    sum: i128,
    count: u64,
}

impl RunningAverage {
    // == Constructor ==
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Adds a value's contribution.
    pub fn add(&mut self, value: i64) {
        self.sum += i128::from(value);
        self.count += 1;
    }

    // == Remove ==
    /// Removes a value's contribution.
    ///
    /// Must only be called for a value previously passed to [`add`](Self::add).
    pub fn remove(&mut self, value: i64) {
        debug_assert!(self.count > 0, "removing from an empty running average");
        self.sum -= i128::from(value);
        self.count = self.count.saturating_sub(1);
    }

    // == Value ==
    /// Current mean, or 0.0 when nothing is counted.
    pub fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// Number of values currently counted.
    pub fn count(&self) -> u64 {
        self.count
    }
}
