//! Timeout guard modes.

/// Selects when the timeout guard of an admitted stream is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeoutMode {
  /// Only the wait for the first element is bounded.
  #[default]
  FirstEmission,
  /// Every gap between elements is bounded; the guard re-arms after each element.
  Idle,
}
