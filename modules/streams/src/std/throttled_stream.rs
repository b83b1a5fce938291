//! Output handle of a running gate.

use core::{
  pin::Pin,
  task::{Context, Poll},
};

use futures::Stream;
use tokio::sync::{mpsc, oneshot};

use crate::core::{StreamCompletion, StreamDone, StreamError};

/// Output of a gate driven on tokio.
///
/// Yields every forwarded element, then at most one error. Dropping the
/// handle cancels the gate.
pub struct ThrottledStream<T> {
  output:     mpsc::UnboundedReceiver<Result<T, StreamError>>,
  cancel:     Option<oneshot::Sender<()>>,
  completion: StreamCompletion<StreamDone>,
}

impl<T> ThrottledStream<T> {
  pub(crate) const fn new(
    output: mpsc::UnboundedReceiver<Result<T, StreamError>>,
    cancel: oneshot::Sender<()>,
    completion: StreamCompletion<StreamDone>,
  ) -> Self {
    Self { output, cancel: Some(cancel), completion }
  }

  /// Cancels the gate: every subscription is dropped and nothing else is yielded.
  ///
  /// Elements already forwarded before the cancellation reached the driver
  /// may still be buffered.
  pub fn cancel(&mut self) {
    if let Some(cancel) = self.cancel.take() {
      let _ = cancel.send(());
    }
  }

  /// Returns a handle resolved when the gate completes or fails.
  #[must_use]
  pub fn completion(&self) -> StreamCompletion<StreamDone> {
    self.completion.clone()
  }
}

impl<T> Stream for ThrottledStream<T> {
  type Item = Result<T, StreamError>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    self.get_mut().output.poll_recv(cx)
  }
}

impl<T> Drop for ThrottledStream<T> {
  fn drop(&mut self) {
    self.cancel();
  }
}
