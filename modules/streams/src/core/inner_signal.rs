/// Payload-free view of a [`StreamEvent`](super::StreamEvent) seen by internal listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InnerSignal {
  Element,
  Complete,
  Error,
}
