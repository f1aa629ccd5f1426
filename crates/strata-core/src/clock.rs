use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A source of the current instant.
///
/// Every TTL comparison in strata goes through this trait so that tests can
/// substitute a deterministic clock and step across expiration boundaries
/// exactly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually advanced clock for deterministic TTL tests.
///
/// Time starts at an arbitrary base instant and only moves when
/// [`SimulatedClock::advance`] is called; clones share the same timeline.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`. The clock never moves backwards.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().expect("clock mutex poisoned");
        *offset += by;
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Instant {
        let offset = self.offset.lock().expect("clock mutex poisoned");
        self.base + *offset
    }
}
