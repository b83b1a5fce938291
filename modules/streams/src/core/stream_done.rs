//! Stream completion marker.

/// Marker value reported when the gate completes successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamDone;

impl StreamDone {
  /// Creates the marker.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}
