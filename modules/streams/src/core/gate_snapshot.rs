//! Point-in-time view of a gate.

use super::StreamState;

/// Counters and registry sizes of a gate at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
  pub(crate) state:                StreamState,
  pub(crate) queued:               usize,
  pub(crate) gating:               usize,
  pub(crate) peak_gating:          usize,
  pub(crate) live:                 usize,
  pub(crate) admitted:             usize,
  pub(crate) outer_subscribed:     bool,
  pub(crate) active_subscriptions: usize,
}

impl GateSnapshot {
  /// Returns the gate state.
  #[must_use]
  pub const fn state(&self) -> StreamState {
    self.state
  }

  /// Returns the number of descriptors waiting for admission.
  #[must_use]
  pub const fn queued(&self) -> usize {
    self.queued
  }

  /// Returns the number of admitted streams without a first element.
  #[must_use]
  pub const fn gating(&self) -> usize {
    self.gating
  }

  /// Returns the highest gating count observed so far.
  #[must_use]
  pub const fn peak_gating(&self) -> usize {
    self.peak_gating
  }

  /// Returns the number of admitted streams that have not completed.
  #[must_use]
  pub const fn live(&self) -> usize {
    self.live
  }

  /// Returns the number of admitted streams still holding a subscription.
  #[must_use]
  pub const fn admitted(&self) -> usize {
    self.admitted
  }

  /// Returns `true` while the outer sequence is subscribed.
  #[must_use]
  pub const fn outer_subscribed(&self) -> bool {
    self.outer_subscribed
  }

  /// Returns the size of the active subscription set: the outer subscription
  /// plus every upstream, listener and armed guard of admitted streams.
  #[must_use]
  pub const fn active_subscriptions(&self) -> usize {
    self.active_subscriptions
  }
}
