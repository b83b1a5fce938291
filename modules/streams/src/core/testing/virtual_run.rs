use alloc::vec::Vec;

use super::{RecordedNotification, SubscriptionLog};
use crate::core::{GateSnapshot, StreamEvent, StreamState};

/// Everything observed while a [`VirtualScheduler`](super::VirtualScheduler) ran.
#[derive(Debug, Clone)]
pub struct VirtualRun<T> {
  pub(crate) notifications: Vec<RecordedNotification<T>>,
  pub(crate) outer:         SubscriptionLog,
  pub(crate) subscriptions: Vec<SubscriptionLog>,
  pub(crate) final_tick:    u64,
  pub(crate) snapshot:      GateSnapshot,
}

impl<T> VirtualRun<T> {
  /// Returns output notifications in emission order.
  #[must_use]
  pub fn notifications(&self) -> &[RecordedNotification<T>] {
    &self.notifications
  }

  /// Returns the subscription log of the outer sequence.
  #[must_use]
  pub const fn outer_subscription(&self) -> &SubscriptionLog {
    &self.outer
  }

  /// Returns subscription logs of admitted sources in admission order.
  #[must_use]
  pub fn subscriptions(&self) -> &[SubscriptionLog] {
    &self.subscriptions
  }

  /// Returns the subscription log of `label`.
  #[must_use]
  pub fn subscription(&self, label: &str) -> Option<&SubscriptionLog> {
    self.subscriptions.iter().find(|log| log.label() == label)
  }

  /// Returns source labels in the order they were admitted.
  #[must_use]
  pub fn admission_order(&self) -> Vec<&str> {
    self.subscriptions.iter().map(SubscriptionLog::label).collect()
  }

  /// Returns emitted elements with their ticks.
  #[must_use]
  pub fn elements(&self) -> Vec<(u64, &T)> {
    self
      .notifications
      .iter()
      .filter_map(|recorded| match recorded.event() {
        | StreamEvent::Next(value) => Some((recorded.tick(), value)),
        | StreamEvent::Complete | StreamEvent::Error(_) => None,
      })
      .collect()
  }

  /// Returns the terminal notification, if the output terminated.
  #[must_use]
  pub fn terminal(&self) -> Option<&RecordedNotification<T>> {
    self.notifications.last().filter(|recorded| recorded.event().is_terminal())
  }

  /// Returns `true` when every subscription taken during the run was dropped.
  #[must_use]
  pub fn all_unsubscribed(&self) -> bool {
    self.outer.is_closed()
      && self.subscriptions.iter().all(SubscriptionLog::is_closed)
      && self.snapshot.active_subscriptions() == 0
  }

  /// Returns the final gate state.
  #[must_use]
  pub const fn state(&self) -> StreamState {
    self.snapshot.state()
  }

  /// Returns the gate counters at the end of the run.
  #[must_use]
  pub const fn snapshot(&self) -> &GateSnapshot {
    &self.snapshot
  }

  /// Returns the virtual tick the run stopped at.
  #[must_use]
  pub const fn final_tick(&self) -> u64 {
    self.final_tick
  }
}
