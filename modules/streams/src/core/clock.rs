//! Clock abstraction.

/// Monotonic tick source consulted by timeout guards.
///
/// Ticks are abstract time units; drivers decide how long one tick lasts.
pub trait Clock {
  /// Returns the current tick, rounded down.
  fn now(&self) -> u64;

  /// Returns the first tick boundary at or after the current instant.
  ///
  /// Guards are armed from this tick so a stream admitted between two
  /// boundaries still gets its full timeout. Clocks that only move in whole
  /// ticks keep the default.
  fn now_ceil(&self) -> u64 {
    self.now()
  }
}
