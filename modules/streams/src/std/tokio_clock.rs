//! Tokio-backed tick clock.

use core::time::Duration;

use tokio::time::Instant;

use crate::core::Clock;


/// Clock counting ticks of `tick_resolution` since its creation.
///
/// Reads tokio time, so paused test runtimes advance it deterministically.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
  origin:          Instant,
  tick_resolution: Duration,
}

impl TokioClock {
  /// Starts a clock at tick zero. A zero resolution is treated as one nanosecond.
  #[must_use]
  pub fn start(tick_resolution: Duration) -> Self {
    Self { origin: Instant::now(), tick_resolution: tick_resolution.max(Duration::from_nanos(1)) }
  }

  /// Returns the tick length.
  #[must_use]
  pub const fn tick_resolution(&self) -> Duration {
    self.tick_resolution
  }

  /// Returns the instant at which `tick` begins, if it is representable.
  #[must_use]
  pub fn instant_at(&self, tick: u64) -> Option<Instant> {
    let nanos = u64::try_from(self.tick_resolution.as_nanos()).ok()?.checked_mul(tick)?;
    self.origin.checked_add(Duration::from_nanos(nanos))
  }
}

impl Clock for TokioClock {
  fn now(&self) -> u64 {
    let elapsed = self.origin.elapsed().as_nanos() / self.tick_resolution.as_nanos();
    u64::try_from(elapsed).unwrap_or(u64::MAX)
  }

  fn now_ceil(&self) -> u64 {
    let elapsed = self.origin.elapsed().as_nanos().div_ceil(self.tick_resolution.as_nanos());
    u64::try_from(elapsed).unwrap_or(u64::MAX)
  }
}
