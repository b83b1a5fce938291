use super::StreamError;

/// Polling result for a gate's terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
  /// The gate has not terminated yet.
  Pending,
  /// The gate terminated with the provided result.
  Ready(Result<T, StreamError>),
}

impl<T> Completion<T> {
  /// Returns `true` once a terminal result is available.
  #[must_use]
  pub const fn is_ready(&self) -> bool {
    matches!(self, Self::Ready(_))
  }
}
