//! Release-gated counter.


/// Counts admitted streams that have not produced their first element yet.
///
/// The count never exceeds the configured limit.
#[derive(Debug, Clone)]
pub struct ReleaseGate {
  limit:  usize,
  gating: usize,
  peak:   usize,
}

impl ReleaseGate {
  /// Creates a gate admitting at most `limit` gating streams.
  #[must_use]
  pub const fn new(limit: usize) -> Self {
    Self { limit, gating: 0, peak: 0 }
  }

  /// Returns `true` when one more stream may be admitted.
  #[must_use]
  pub const fn has_capacity(&self) -> bool {
    self.gating < self.limit
  }

  /// Takes a slot. Returns `false` and leaves the count unchanged when the gate is full.
  pub const fn try_acquire(&mut self) -> bool {
    if !self.has_capacity() {
      return false;
    }
    self.gating += 1;
    if self.gating > self.peak {
      self.peak = self.gating;
    }
    true
  }

  /// Frees a slot. Returns `false` when no slot was held.
  pub const fn release(&mut self) -> bool {
    if self.gating == 0 {
      return false;
    }
    self.gating -= 1;
    true
  }

  /// Returns the number of gating streams.
  #[must_use]
  pub const fn gating(&self) -> usize {
    self.gating
  }

  /// Returns the configured limit.
  #[must_use]
  pub const fn limit(&self) -> usize {
    self.limit
  }

  /// Returns the highest gating count observed.
  #[must_use]
  pub const fn peak(&self) -> usize {
    self.peak
  }
}
