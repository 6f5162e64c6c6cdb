//! Edge detection over a single sampled signal.
//!
//! Simulated signals can already read high the first time they are inspected
//! after a scheduling pass, so edges are derived from a remembered previous
//! sample rather than from the current level.

/// Tracks the previous and current sample of one signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
    current: bool,
}

impl EdgeDetector {
    /// Creates a detector whose history is all-low.
    pub const fn new() -> Self {
        Self {
            previous: false,
            current: false,
        }
    }

    /// Records a new sample; the old current sample becomes the previous one.
    #[inline]
    pub const fn update(&mut self, value: bool) {
        self.previous = self.current;
        self.current = value;
    }

    /// True iff the last update moved the signal from 0 to 1.
    #[inline]
    pub const fn pos_edge(&self) -> bool {
        !self.previous && self.current
    }

    /// True iff the last update moved the signal from 1 to 0.
    #[inline]
    pub const fn neg_edge(&self) -> bool {
        self.previous && !self.current
    }

    /// Most recent sample.
    #[inline]
    pub const fn current(&self) -> bool {
        self.current
    }

    /// Sample before the most recent one.
    #[inline]
    pub const fn previous(&self) -> bool {
        self.previous
    }
}
