//! Commands emitted by the gate.

use super::{InnerId, StreamError};

/// Side effect requested by [`ThrottleUntilSome`](super::ThrottleUntilSome).
///
/// The gate never performs I/O itself. Drivers drain commands with
/// [`poll_command`](super::ThrottleUntilSome::poll_command) after every event
/// and execute them in order.
#[derive(Debug, PartialEq, Eq)]
pub enum GateCommand<D, T> {
  /// Subscribe to the descriptor. Its notifications must be fed back with `id`.
  SubscribeInner {
    /// Identifier assigned at admission.
    id:         InnerId,
    /// Descriptor to start.
    descriptor: D,
  },
  /// Drop the subscription of an admitted stream.
  UnsubscribeInner {
    /// Identifier of the stream.
    id: InnerId,
  },
  /// Drop the subscription of the outer sequence.
  UnsubscribeOuter,
  /// Deliver an element downstream.
  Emit(T),
  /// Complete the output.
  Complete,
  /// Fail the output.
  Fail(StreamError),
}
