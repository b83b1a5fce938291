use alloc::{sync::Arc, vec::Vec};
use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll, Waker},
};

use spin::Mutex;

use super::{Completion, StreamError};


struct CompletionSlot<T> {
  result:  Option<Result<T, StreamError>>,
  waiters: Vec<Waker>,
}

/// Shared handle resolved once with the terminal result of a gate.
///
/// Cancellation never resolves the handle: only completion and failure do.
/// Every clone observes the same result, either by polling
/// [`poll`](Self::poll) or by awaiting the handle itself.
pub struct StreamCompletion<T> {
  slot: Arc<Mutex<CompletionSlot<T>>>,
}

impl<T> Clone for StreamCompletion<T> {
  fn clone(&self) -> Self {
    Self { slot: self.slot.clone() }
  }
}

impl<T> StreamCompletion<T> {
  /// Creates an unresolved handle.
  #[must_use]
  pub fn new() -> Self {
    Self { slot: Arc::new(Mutex::new(CompletionSlot { result: None, waiters: Vec::new() })) }
  }

  /// Returns the terminal result without consuming it.
  #[must_use]
  pub fn poll(&self) -> Completion<T>
  where
    T: Clone, {
    match self.slot.lock().result.clone() {
      | Some(result) => Completion::Ready(result),
      | None => Completion::Pending,
    }
  }

  /// Takes the terminal result, leaving the handle unresolved for other clones.
  #[must_use]
  pub fn try_take(&self) -> Option<Result<T, StreamError>> {
    self.slot.lock().result.take()
  }

  /// Resolves the handle and wakes every waiting task. Later results are ignored.
  pub(crate) fn complete(&self, result: Result<T, StreamError>) {
    let waiters = {
      let mut slot = self.slot.lock();
      if slot.result.is_some() {
        return;
      }
      slot.result = Some(result);
      core::mem::take(&mut slot.waiters)
    };
    for waker in waiters {
      waker.wake();
    }
  }
}

impl<T> Default for StreamCompletion<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Future for StreamCompletion<T>
where
  T: Clone,
{
  type Output = Result<T, StreamError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let mut slot = self.slot.lock();
    if let Some(result) = slot.result.clone() {
      return Poll::Ready(result);
    }
    if !slot.waiters.iter().any(|waiter| waiter.will_wake(cx.waker())) {
      slot.waiters.push(cx.waker().clone());
    }
    Poll::Pending
  }
}
