//! Drive outcome definitions.

/// Outcome of feeding one event into the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
  /// The event changed the gate state.
  Progressed,
  /// The event was ignored.
  Idle,
}
