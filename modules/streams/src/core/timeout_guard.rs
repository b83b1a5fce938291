//! Timeout guard of one admitted stream.

use super::TimeoutMode;


/// Deadline tracker that fails a silent stream.
///
/// The guard is armed when the stream is admitted. Depending on its
/// [`TimeoutMode`] it either disarms on the first element or re-arms after
/// every element. Terminal signals always disarm it.
#[derive(Debug, Clone)]
pub struct TimeoutGuard {
  duration_ticks: u64,
  mode:           TimeoutMode,
  deadline:       Option<u64>,
}

impl TimeoutGuard {
  /// Creates a guard armed at `now + duration_ticks`.
  #[must_use]
  pub const fn armed(now: u64, duration_ticks: u64, mode: TimeoutMode) -> Self {
    Self { duration_ticks, mode, deadline: Some(now.saturating_add(duration_ticks)) }
  }

  /// Records an element observed at `now`.
  pub const fn on_element(&mut self, now: u64) {
    self.deadline = match self.mode {
      | TimeoutMode::FirstEmission => None,
      | TimeoutMode::Idle => Some(now.saturating_add(self.duration_ticks)),
    };
  }

  /// Stops the guard.
  pub const fn disarm(&mut self) {
    self.deadline = None;
  }

  /// Returns the pending deadline, if any.
  #[must_use]
  pub const fn deadline(&self) -> Option<u64> {
    self.deadline
  }

  /// Returns `true` when the guard is armed.
  #[must_use]
  pub const fn is_armed(&self) -> bool {
    self.deadline.is_some()
  }

  /// Returns `true` when the deadline has been reached at `now`.
  #[must_use]
  pub const fn is_expired(&self, now: u64) -> bool {
    match self.deadline {
      | Some(deadline) => now >= deadline,
      | None => false,
    }
  }

  /// Returns the configured duration.
  #[must_use]
  pub const fn duration_ticks(&self) -> u64 {
    self.duration_ticks
  }
}
