//! Stream state definitions.

/// Execution state of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
  /// Gate has not started yet.
  Idle,
  /// Gate is running.
  Running,
  /// Gate completed successfully.
  Completed,
  /// Gate failed.
  Failed,
  /// Gate was cancelled by its consumer.
  Cancelled,
}

impl StreamState {
  /// Returns `true` for states that accept no further events.
  #[must_use]
  pub const fn is_terminal(self) -> bool {
    matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
  }
}
