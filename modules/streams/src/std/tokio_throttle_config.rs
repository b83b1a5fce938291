//! Configuration for the tokio driver.

use core::time::Duration;

use crate::core::ThrottleConfig;


/// Configuration for [`TokioThrottle`](super::TokioThrottle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokioThrottleConfig {
  /// Gate configuration; timeouts are expressed in ticks.
  pub throttle:        ThrottleConfig,
  /// Length of one tick.
  pub tick_resolution: Duration,
}

impl TokioThrottleConfig {
  /// Default tick length, making the default timeout 3000 ms.
  pub const DEFAULT_TICK_RESOLUTION: Duration = Duration::from_millis(1);

  /// Creates a configuration with millisecond ticks.
  #[must_use]
  pub const fn new(throttle: ThrottleConfig) -> Self {
    Self { throttle, tick_resolution: Self::DEFAULT_TICK_RESOLUTION }
  }

  /// Overrides the tick length.
  #[must_use]
  pub const fn with_tick_resolution(mut self, tick_resolution: Duration) -> Self {
    self.tick_resolution = tick_resolution;
    self
  }

  /// Returns the inner timeout as wall-clock duration.
  #[must_use]
  pub fn timeout(&self) -> Duration {
    let ticks = u32::try_from(self.throttle.timeout_ticks()).unwrap_or(u32::MAX);
    self.tick_resolution.saturating_mul(ticks)
  }
}
