//! Configuration argument errors.


/// Errors raised while building a gate configuration.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StreamDslError {
  /// An argument was outside of its accepted range.
  #[error("invalid argument `{name}` = {value}: {reason}")]
  InvalidArgument {
    /// Argument name.
    name:   &'static str,
    /// Rejected value.
    value:  u64,
    /// Human readable constraint.
    reason: &'static str,
  },
}
