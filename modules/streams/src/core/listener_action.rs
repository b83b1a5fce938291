/// Request raised by an internal listener after a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerAction {
  /// Free the admission slot and try to admit queued descriptors.
  Release,
  /// Forward the element to the output.
  Forward,
  /// The stream completed; decrement the live count and unsubscribe.
  Finish,
  /// The stream failed; fail the whole gate.
  Fail,
}
