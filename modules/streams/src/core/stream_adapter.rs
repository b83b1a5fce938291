//! Shared subscription of one admitted inner stream.

use alloc::vec::Vec;

use super::{
  InnerId, ThrottleConfig, TimeoutGuard, inner_signal::InnerSignal, listener_action::ListenerAction,
  stream_listener::StreamListener,
};


/// Wraps the single upstream subscription of an admitted stream.
///
/// The upstream is subscribed exactly once by the driver. Internal listeners
/// are kept in attach order and notified synchronously for every signal, so
/// the release detector always sees a notification before the value
/// forwarder does. The upstream stays open while at least one listener is
/// attached.
#[derive(Debug)]
pub(crate) struct StreamAdapter {
  id:            InnerId,
  listeners:     Vec<StreamListener>,
  guard:         TimeoutGuard,
  upstream_open: bool,
}

impl StreamAdapter {
  /// Creates the adapter for a stream admitted at `now`.
  pub(crate) fn subscribe(id: InnerId, now: u64, config: &ThrottleConfig) -> Self {
    let mut listeners = Vec::with_capacity(2);
    listeners.push(StreamListener::ReleaseDetector);
    listeners.push(StreamListener::ValueForwarder);
    Self {
      id,
      listeners,
      guard: TimeoutGuard::armed(now, config.timeout_ticks(), config.timeout_mode()),
      upstream_open: true,
    }
  }

  pub(crate) const fn id(&self) -> InnerId {
    self.id
  }

  /// Multicasts `signal` to every attached listener and collects their actions.
  pub(crate) fn dispatch(&mut self, signal: InnerSignal, now: u64) -> Vec<ListenerAction> {
    if !self.upstream_open {
      return Vec::new();
    }
    match signal {
      | InnerSignal::Element => self.guard.on_element(now),
      | InnerSignal::Complete | InnerSignal::Error => self.guard.disarm(),
    }
    let mut actions = Vec::with_capacity(self.listeners.len());
    self.listeners.retain(|listener| {
      let (action, attached) = listener.notify(signal);
      actions.push(action);
      attached
    });
    if self.listeners.is_empty() {
      self.upstream_open = false;
    }
    actions
  }

  /// Returns `true` once the release detector has fired.
  pub(crate) fn is_released(&self) -> bool {
    !self.listeners.contains(&StreamListener::ReleaseDetector)
  }

  pub(crate) const fn deadline(&self) -> Option<u64> {
    self.guard.deadline()
  }

  pub(crate) const fn is_expired(&self, now: u64) -> bool {
    self.upstream_open && self.guard.is_expired(now)
  }

  pub(crate) const fn timeout_ticks(&self) -> u64 {
    self.guard.duration_ticks()
  }

  /// Counts the upstream subscription, attached listeners and an armed guard.
  pub(crate) fn subscription_count(&self) -> usize {
    usize::from(self.upstream_open) + self.listeners.len() + usize::from(self.guard.is_armed())
  }

  /// Detaches every listener, stops the guard and drops the upstream.
  pub(crate) fn close(&mut self) {
    self.listeners.clear();
    self.guard.disarm();
    self.upstream_open = false;
  }
}
