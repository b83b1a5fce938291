//! Admission queue.

use alloc::collections::VecDeque;


/// FIFO of descriptors that arrived but have not been admitted yet.
///
/// Insertion order is admission order; the queue is unbounded.
#[derive(Debug)]
pub struct AdmissionQueue<D> {
  pending: VecDeque<D>,
}

impl<D> AdmissionQueue<D> {
  /// Creates an empty queue.
  #[must_use]
  pub const fn new() -> Self {
    Self { pending: VecDeque::new() }
  }

  /// Appends a descriptor to the tail.
  pub fn enqueue(&mut self, descriptor: D) {
    self.pending.push_back(descriptor);
  }

  /// Removes the descriptor at the head.
  pub fn dequeue(&mut self) -> Option<D> {
    self.pending.pop_front()
  }

  /// Returns the number of queued descriptors.
  #[must_use]
  pub fn len(&self) -> usize {
    self.pending.len()
  }

  /// Returns `true` when nothing is queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }

  /// Drops every queued descriptor and returns how many were discarded.
  pub fn clear(&mut self) -> usize {
    let discarded = self.pending.len();
    self.pending.clear();
    discarded
  }
}

impl<D> Default for AdmissionQueue<D> {
  fn default() -> Self {
    Self::new()
  }
}
