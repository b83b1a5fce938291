//! Completion policy definitions.

/// Decides when a gate reports successful completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
  /// Completes as soon as an inner completion leaves no gating and no live streams.
  ///
  /// The outer sequence's own completion is ignored. Output that drains between
  /// two arrivals completes early, and an outer sequence that ends while
  /// descriptors can never be admitted never completes.
  #[default]
  CountersOnly,
  /// Completes once the outer sequence has completed, nothing is queued and
  /// both counters are zero.
  AwaitOuter,
}
