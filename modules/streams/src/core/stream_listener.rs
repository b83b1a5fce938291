use super::{inner_signal::InnerSignal, listener_action::ListenerAction};

/// Internal listener attached to the shared subscription of one inner stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StreamListener {
  /// Watches for the first signal only, then detaches.
  ReleaseDetector,
  /// Forwards every element and reacts to terminal signals.
  ValueForwarder,
}

impl StreamListener {
  /// Notifies the listener. Returns the requested action and whether the
  /// listener stays attached.
  pub(crate) const fn notify(self, signal: InnerSignal) -> (ListenerAction, bool) {
    match (self, signal) {
      // Any first signal frees the slot, including completion without elements.
      | (Self::ReleaseDetector, _) => (ListenerAction::Release, false),
      | (Self::ValueForwarder, InnerSignal::Element) => (ListenerAction::Forward, true),
      | (Self::ValueForwarder, InnerSignal::Complete) => (ListenerAction::Finish, false),
      | (Self::ValueForwarder, InnerSignal::Error) => (ListenerAction::Fail, false),
    }
  }
}
