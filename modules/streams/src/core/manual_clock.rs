//! Manually advanced clock for deterministic tests.

use alloc::sync::Arc;

use portable_atomic::{AtomicU64, Ordering};

use super::Clock;


/// Clock whose time only moves when told to.
///
/// Clones share the same tick counter, so a test can keep one handle while
/// the gate owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
  ticks: Arc<AtomicU64>,
}

impl ManualClock {
  /// Creates a clock positioned at tick zero.
  #[must_use]
  pub fn new() -> Self {
    Self { ticks: Arc::new(AtomicU64::new(0)) }
  }

  /// Advances the clock by `ticks` and returns the new tick.
  pub fn advance(&self, ticks: u64) -> u64 {
    self.ticks.fetch_add(ticks, Ordering::AcqRel).saturating_add(ticks)
  }

  /// Moves the clock to `tick`. Earlier ticks are ignored to keep time monotonic.
  pub fn set(&self, tick: u64) {
    self.ticks.fetch_max(tick, Ordering::AcqRel);
  }
}

impl Clock for ManualClock {
  fn now(&self) -> u64 {
    self.ticks.load(Ordering::Acquire)
  }
}
