//! Live-stream counter.


/// Counts admitted streams that have not completed yet.
#[derive(Debug, Clone, Default)]
pub struct LiveCounter {
  live: usize,
}

impl LiveCounter {
  /// Creates a counter at zero.
  #[must_use]
  pub const fn new() -> Self {
    Self { live: 0 }
  }

  /// Records one more live stream.
  pub const fn increment(&mut self) {
    self.live += 1;
  }

  /// Records a completed stream. Returns `false` when nothing was live.
  pub const fn decrement(&mut self) -> bool {
    if self.live == 0 {
      return false;
    }
    self.live -= 1;
    true
  }

  /// Returns the number of live streams.
  #[must_use]
  pub const fn live(&self) -> usize {
    self.live
  }

  /// Returns `true` when no stream is live.
  #[must_use]
  pub const fn is_zero(&self) -> bool {
    self.live == 0
  }
}
