use crate::core::{InnerId, StreamError, StreamEvent};

/// Notification forwarded to the driver task.
pub(crate) enum GateEvent<S, T> {
  OuterNext(S),
  OuterError(StreamError),
  OuterComplete,
  Inner(InnerId, StreamEvent<T>),
}
