//! Time source abstraction.
//!
//! # Responsibility
//! - Decouple containers from wall-clock time so timestamp ordering and
//!   notification expiry are deterministic under test.
//!
//! # Invariants
//! - `now()` is monotone non-decreasing for `ManualClock`; `SystemClock`
//!   follows the host clock.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Injected time source for containers.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source for production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-advanced time source for tests.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and move time forward for a container holding another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves shared time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
