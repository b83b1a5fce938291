//! Stream error definitions.

use alloc::string::{String, ToString};
use core::fmt::Display;


/// Errors produced by the gate and its drivers.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
  /// An admitted stream stayed silent past its timeout.
  #[error("Timeout has occurred")]
  Timeout {
    /// Configured timeout in ticks.
    ticks: u64,
  },
  /// An admitted inner stream failed.
  #[error("inner stream failed: {reason}")]
  InnerFailed {
    /// Failure description reported by the inner stream.
    reason: String,
  },
  /// The outer sequence of inner streams failed.
  #[error("outer sequence failed: {reason}")]
  OuterFailed {
    /// Failure description reported by the outer sequence.
    reason: String,
  },
  /// The gate has already been started.
  #[error("gate already started")]
  AlreadyStarted,
  /// The gate is not running.
  #[error("gate is not running")]
  NotRunning,
  /// The driver task is unavailable.
  #[error("driver is unavailable")]
  DriverUnavailable,
}

impl StreamError {
  /// Creates an [`StreamError::InnerFailed`] from any displayable error.
  #[must_use]
  pub fn inner(error: impl Display) -> Self {
    Self::InnerFailed { reason: error.to_string() }
  }

  /// Creates an [`StreamError::OuterFailed`] from any displayable error.
  #[must_use]
  pub fn outer(error: impl Display) -> Self {
    Self::OuterFailed { reason: error.to_string() }
  }

  /// Returns `true` when the error was raised by a timeout guard.
  #[must_use]
  pub const fn is_timeout(&self) -> bool {
    matches!(self, Self::Timeout { .. })
  }
}
