//! Extension methods for outer sequences of streams.

use core::fmt::Display;

use futures::Stream;

use super::{ThrottledStream, TokioThrottle, TokioThrottleConfig};
use crate::core::StreamError;

/// Adds [`throttle_until_some`](Self::throttle_until_some) to every stream of streams.
pub trait ThrottleUntilSomeExt<S, E>: Stream<Item = Result<S, E>> + Sized {
  /// Admits at most `config.throttle.limit()` inner streams that have not yet
  /// produced their first element and merges everything they emit.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::DriverUnavailable`] when called outside a tokio runtime.
  fn throttle_until_some<T, E2>(self, config: TokioThrottleConfig) -> Result<ThrottledStream<T>, StreamError>
  where
    Self: Send + 'static,
    S: Stream<Item = Result<T, E2>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    E2: Display + Send + 'static, {
    TokioThrottle::new(config).run(self)
  }
}

impl<O, S, E> ThrottleUntilSomeExt<S, E> for O where O: Stream<Item = Result<S, E>> {}
