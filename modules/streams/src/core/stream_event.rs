//! Notifications flowing through the gate.

use super::{StreamError, inner_signal::InnerSignal};

/// A single notification of a stream: an element or a terminal signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent<T> {
  /// An element.
  Next(T),
  /// Successful completion.
  Complete,
  /// Failure.
  Error(StreamError),
}

impl<T> StreamEvent<T> {
  /// Returns `true` for [`StreamEvent::Complete`] and [`StreamEvent::Error`].
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    !matches!(self, Self::Next(_))
  }

  pub(crate) const fn signal(&self) -> InnerSignal {
    match self {
      | Self::Next(_) => InnerSignal::Element,
      | Self::Complete => InnerSignal::Complete,
      | Self::Error(_) => InnerSignal::Error,
    }
  }
}
