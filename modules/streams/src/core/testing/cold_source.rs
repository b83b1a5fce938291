use alloc::{borrow::Cow, vec::Vec};

use crate::core::{StreamError, StreamEvent};


/// Scripted inner stream whose notifications are relative to its subscription.
///
/// Nothing happens until the gate admits the source; every scripted offset
/// is then added to the admission tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColdSource<T> {
  label:  Cow<'static, str>,
  script: Vec<(u64, StreamEvent<T>)>,
}

impl<T> ColdSource<T> {
  /// Creates a source with an empty script. It never emits nor completes.
  #[must_use]
  pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
    Self { label: label.into(), script: Vec::new() }
  }

  /// Creates a source that emits `value` after `delay` ticks and completes on the same tick.
  #[must_use]
  pub fn single_after(label: impl Into<Cow<'static, str>>, delay: u64, value: T) -> Self {
    Self::new(label).next_at(delay, value).complete_at(delay)
  }

  /// Schedules an element.
  #[must_use]
  pub fn next_at(self, offset: u64, value: T) -> Self {
    self.push(offset, StreamEvent::Next(value))
  }

  /// Schedules completion.
  #[must_use]
  pub fn complete_at(self, offset: u64) -> Self {
    self.push(offset, StreamEvent::Complete)
  }

  /// Schedules a failure.
  #[must_use]
  pub fn error_at(self, offset: u64, error: StreamError) -> Self {
    self.push(offset, StreamEvent::Error(error))
  }

  /// Returns the label used in subscription logs and admission order.
  #[must_use]
  pub fn label(&self) -> &str {
    &self.label
  }

  pub(crate) fn into_parts(self) -> (Cow<'static, str>, Vec<(u64, StreamEvent<T>)>) {
    (self.label, self.script)
  }

  fn push(mut self, offset: u64, event: StreamEvent<T>) -> Self {
    // Stable insertion keeps same-offset notifications in declaration order.
    let index = self.script.partition_point(|(scheduled, _)| *scheduled <= offset);
    self.script.insert(index, (offset, event));
    self
  }
}
