//! Gate configuration.

use super::{CompletionPolicy, StreamDslError, TimeoutMode};

#[cfg(test)]
mod tests;

/// Configuration for [`ThrottleUntilSome`](super::ThrottleUntilSome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
  limit:             usize,
  timeout_ticks:     u64,
  timeout_mode:      TimeoutMode,
  completion_policy: CompletionPolicy,
}

impl ThrottleConfig {
  /// Timeout applied when none is configured.
  pub const DEFAULT_TIMEOUT_TICKS: u64 = 3000;

  /// Creates a configuration admitting at most `limit` gating streams.
  ///
  /// # Errors
  ///
  /// Returns [`StreamDslError::InvalidArgument`] when `limit` is zero.
  pub const fn new(limit: usize) -> Result<Self, StreamDslError> {
    if let Err(error) = positive("limit", limit as u64) {
      return Err(error);
    }
    Ok(Self {
      limit,
      timeout_ticks: Self::DEFAULT_TIMEOUT_TICKS,
      timeout_mode: TimeoutMode::FirstEmission,
      completion_policy: CompletionPolicy::CountersOnly,
    })
  }

  /// Returns the maximum number of gating streams.
  #[must_use]
  pub const fn limit(&self) -> usize {
    self.limit
  }

  /// Returns the timeout in ticks.
  #[must_use]
  pub const fn timeout_ticks(&self) -> u64 {
    self.timeout_ticks
  }

  /// Returns the timeout mode.
  #[must_use]
  pub const fn timeout_mode(&self) -> TimeoutMode {
    self.timeout_mode
  }

  /// Returns the completion policy.
  #[must_use]
  pub const fn completion_policy(&self) -> CompletionPolicy {
    self.completion_policy
  }

  /// Updates the timeout.
  ///
  /// # Errors
  ///
  /// Returns [`StreamDslError::InvalidArgument`] when `ticks` is zero.
  pub const fn with_timeout_ticks(mut self, ticks: u64) -> Result<Self, StreamDslError> {
    self.timeout_ticks = match positive("timeout_ticks", ticks) {
      | Ok(ticks) => ticks,
      | Err(error) => return Err(error),
    };
    Ok(self)
  }

  /// Updates the timeout mode.
  #[must_use]
  pub const fn with_timeout_mode(mut self, timeout_mode: TimeoutMode) -> Self {
    self.timeout_mode = timeout_mode;
    self
  }

  /// Updates the completion policy.
  #[must_use]
  pub const fn with_completion_policy(mut self, completion_policy: CompletionPolicy) -> Self {
    self.completion_policy = completion_policy;
    self
  }
}

const fn positive(name: &'static str, value: u64) -> Result<u64, StreamDslError> {
  if value == 0 {
    return Err(StreamDslError::InvalidArgument { name, value, reason: "must be greater than zero" });
  }
  Ok(value)
}
