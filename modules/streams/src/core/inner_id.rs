//! Identifier assigned to admitted inner streams.

use core::fmt;

/// Identifier of an admitted inner stream, unique per gate instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InnerId(u64);

impl InnerId {
  /// Creates a new identifier.
  #[must_use]
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn raw(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for InnerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "inner-{}", self.0)
  }
}
