use alloc::borrow::Cow;

/// Subscription interval of one admitted cold source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionLog {
  label:           Cow<'static, str>,
  subscribed_at:   u64,
  unsubscribed_at: Option<u64>,
}

impl SubscriptionLog {
  pub(crate) const fn opened(label: Cow<'static, str>, subscribed_at: u64) -> Self {
    Self { label, subscribed_at, unsubscribed_at: None }
  }

  pub(crate) const fn close(&mut self, tick: u64) {
    if self.unsubscribed_at.is_none() {
      self.unsubscribed_at = Some(tick);
    }
  }

  /// Returns the source label.
  #[must_use]
  pub fn label(&self) -> &str {
    &self.label
  }

  /// Returns the admission tick.
  #[must_use]
  pub const fn subscribed_at(&self) -> u64 {
    self.subscribed_at
  }

  /// Returns the tick the subscription was dropped at.
  #[must_use]
  pub const fn unsubscribed_at(&self) -> Option<u64> {
    self.unsubscribed_at
  }

  /// Returns `true` once the subscription has been dropped.
  #[must_use]
  pub const fn is_closed(&self) -> bool {
    self.unsubscribed_at.is_some()
  }
}
