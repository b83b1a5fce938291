use crate::core::StreamEvent;

/// Output notification observed at a virtual tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotification<T> {
  tick:  u64,
  event: StreamEvent<T>,
}

impl<T> RecordedNotification<T> {
  /// Creates a recorded notification.
  #[must_use]
  pub const fn new(tick: u64, event: StreamEvent<T>) -> Self {
    Self { tick, event }
  }

  /// Returns the tick the notification was emitted at.
  #[must_use]
  pub const fn tick(&self) -> u64 {
    self.tick
  }

  /// Returns the notification.
  #[must_use]
  pub const fn event(&self) -> &StreamEvent<T> {
    &self.event
  }
}
