//! Admission-limiting multiplexer.

use alloc::{collections::VecDeque, vec::Vec};

use ahash::RandomState;
use hashbrown::HashMap;

use super::{
  AdmissionQueue, Clock, CompletionPolicy, DriveOutcome, GateCommand, GateSnapshot, InnerId, LiveCounter,
  ReleaseGate, StreamError, StreamEvent, StreamState, ThrottleConfig, listener_action::ListenerAction,
  stream_adapter::StreamAdapter,
};


const LOG_TARGET: &str = "firstgate::gate";

/// Multiplexes a sequence of inner stream descriptors into one output while
/// keeping at most `limit` admitted streams waiting for their first element.
///
/// The gate is a synchronous state machine. A driver subscribes to the outer
/// sequence, feeds every notification through the `on_*` handlers and then
/// drains [`GateCommand`]s with [`poll_command`](Self::poll_command). Handlers
/// never call back into the driver, so an inner stream that emits while it is
/// being subscribed simply produces the next event instead of recursing.
///
/// * A slot is taken when a descriptor is admitted and freed by its first
///   element (or its first terminal signal).
/// * Every element is forwarded in the order the gate observes it.
/// * The first failure anywhere, including a timeout, fails the output once
///   and tears down every subscription.
pub struct ThrottleUntilSome<D, T, C> {
  config:           ThrottleConfig,
  clock:            C,
  state:            StreamState,
  queue:            AdmissionQueue<D>,
  gate:             ReleaseGate,
  live:             LiveCounter,
  adapters:         HashMap<InnerId, StreamAdapter, RandomState>,
  outer_subscribed: bool,
  outer_completed:  bool,
  next_inner_id:    u64,
  commands:         VecDeque<GateCommand<D, T>>,
}

impl<D, T, C> ThrottleUntilSome<D, T, C>
where
  C: Clock,
{
  /// Creates an idle gate.
  #[must_use]
  pub fn new(config: ThrottleConfig, clock: C) -> Self {
    Self {
      gate: ReleaseGate::new(config.limit()),
      config,
      clock,
      state: StreamState::Idle,
      queue: AdmissionQueue::new(),
      live: LiveCounter::new(),
      adapters: HashMap::with_hasher(RandomState::new()),
      outer_subscribed: false,
      outer_completed: false,
      next_inner_id: 0,
      commands: VecDeque::new(),
    }
  }

  /// Marks the outer sequence as subscribed and starts accepting events.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::AlreadyStarted`] when the gate left the idle state.
  pub fn start(&mut self) -> Result<(), StreamError> {
    if self.state != StreamState::Idle {
      return Err(StreamError::AlreadyStarted);
    }
    self.state = StreamState::Running;
    self.outer_subscribed = true;
    tracing::debug!(target: LOG_TARGET, limit = self.config.limit(), "gate started");
    Ok(())
  }

  /// Returns the configuration.
  #[must_use]
  pub const fn config(&self) -> &ThrottleConfig {
    &self.config
  }

  /// Returns the current state.
  #[must_use]
  pub const fn state(&self) -> StreamState {
    self.state
  }

  /// Handles a descriptor delivered by the outer sequence.
  pub fn on_outer_next(&mut self, descriptor: D) -> DriveOutcome {
    if !self.accepts_outer() {
      return DriveOutcome::Idle;
    }
    self.queue.enqueue(descriptor);
    self.admit_ready();
    DriveOutcome::Progressed
  }

  /// Handles a failure of the outer sequence.
  pub fn on_outer_error(&mut self, error: StreamError) -> DriveOutcome {
    if !self.accepts_outer() {
      return DriveOutcome::Idle;
    }
    self.outer_subscribed = false;
    self.fail(error);
    DriveOutcome::Progressed
  }

  /// Handles completion of the outer sequence.
  pub fn on_outer_complete(&mut self) -> DriveOutcome {
    if !self.accepts_outer() {
      return DriveOutcome::Idle;
    }
    self.outer_subscribed = false;
    self.outer_completed = true;
    tracing::trace!(target: LOG_TARGET, queued = self.queue.len(), "outer sequence completed");
    if self.config.completion_policy() == CompletionPolicy::AwaitOuter {
      self.try_complete();
    }
    DriveOutcome::Progressed
  }

  /// Handles a notification of the admitted stream `id`.
  ///
  /// Notifications for unknown or already unsubscribed streams are ignored.
  pub fn on_inner_event(&mut self, id: InnerId, event: StreamEvent<T>) -> DriveOutcome {
    if self.state != StreamState::Running {
      return DriveOutcome::Idle;
    }
    let armed_at = self.clock.now_ceil();
    let Some(adapter) = self.adapters.get_mut(&id) else {
      return DriveOutcome::Idle;
    };
    let actions = adapter.dispatch(event.signal(), armed_at);
    if actions.is_empty() {
      return DriveOutcome::Idle;
    }

    let (mut element, mut error) = match event {
      | StreamEvent::Next(value) => (Some(value), None),
      | StreamEvent::Complete => (None, None),
      | StreamEvent::Error(error) => (None, Some(error)),
    };
    let mut finished = false;
    for action in actions {
      match action {
        | ListenerAction::Release => self.release(id),
        | ListenerAction::Forward => {
          if let Some(value) = element.take() {
            self.commands.push_back(GateCommand::Emit(value));
          }
        },
        | ListenerAction::Finish => {
          self.finish(id);
          finished = true;
        },
        | ListenerAction::Fail => {
          if let Some(error) = error.take() {
            tracing::warn!(target: LOG_TARGET, inner_id = id.raw(), error = %error, "inner stream failed");
            self.fail(error);
          }
        },
      }
    }

    if self.state == StreamState::Running {
      self.admit_ready();
      if finished {
        self.try_complete();
      }
    }
    DriveOutcome::Progressed
  }

  /// Fires the timeout guard with the earliest expired deadline, if any.
  ///
  /// An expired guard fails its stream exactly like an inner failure would.
  pub fn on_tick(&mut self) -> DriveOutcome {
    if self.state != StreamState::Running {
      return DriveOutcome::Idle;
    }
    let now = self.clock.now();
    let expired = self
      .adapters
      .values()
      .filter(|adapter| adapter.is_expired(now))
      .min_by_key(|adapter| (adapter.deadline(), adapter.id()))
      .map(|adapter| (adapter.id(), adapter.timeout_ticks()));
    let Some((id, ticks)) = expired else {
      return DriveOutcome::Idle;
    };
    tracing::warn!(target: LOG_TARGET, inner_id = id.raw(), now, ticks, "inner stream timed out");
    self.on_inner_event(id, StreamEvent::Error(StreamError::Timeout { ticks }))
  }

  /// Returns the earliest armed timeout deadline.
  #[must_use]
  pub fn next_deadline(&self) -> Option<u64> {
    if self.state != StreamState::Running {
      return None;
    }
    self.adapters.values().filter_map(StreamAdapter::deadline).min()
  }

  /// Cancels the gate on behalf of its consumer.
  ///
  /// Every subscription is dropped and nothing is emitted afterwards.
  pub fn cancel(&mut self) -> DriveOutcome {
    match self.state {
      | StreamState::Idle => {
        self.state = StreamState::Cancelled;
        DriveOutcome::Progressed
      },
      | StreamState::Running => {
        self.state = StreamState::Cancelled;
        tracing::debug!(target: LOG_TARGET, admitted = self.adapters.len(), "gate cancelled");
        self.teardown();
        DriveOutcome::Progressed
      },
      | StreamState::Completed | StreamState::Failed | StreamState::Cancelled => DriveOutcome::Idle,
    }
  }

  /// Takes the next pending command.
  pub fn poll_command(&mut self) -> Option<GateCommand<D, T>> {
    self.commands.pop_front()
  }

  /// Returns the number of commands waiting to be drained.
  #[must_use]
  pub fn pending_commands(&self) -> usize {
    self.commands.len()
  }

  /// Returns the current counters.
  #[must_use]
  pub fn snapshot(&self) -> GateSnapshot {
    let inner_subscriptions: usize = self.adapters.values().map(StreamAdapter::subscription_count).sum();
    GateSnapshot {
      state:                self.state,
      queued:               self.queue.len(),
      gating:               self.gate.gating(),
      peak_gating:          self.gate.peak(),
      live:                 self.live.live(),
      admitted:             self.adapters.len(),
      outer_subscribed:     self.outer_subscribed,
      active_subscriptions: usize::from(self.outer_subscribed) + inner_subscriptions,
    }
  }

  const fn accepts_outer(&self) -> bool {
    matches!(self.state, StreamState::Running) && self.outer_subscribed
  }

  fn admit_ready(&mut self) {
    while !self.queue.is_empty() && self.gate.try_acquire() {
      let Some(descriptor) = self.queue.dequeue() else {
        break;
      };
      self.admit(descriptor);
    }
  }

  fn admit(&mut self, descriptor: D) {
    let id = InnerId::new(self.next_inner_id);
    self.next_inner_id += 1;
    let armed_at = self.clock.now_ceil();
    self.live.increment();
    self.adapters.insert(id, StreamAdapter::subscribe(id, armed_at, &self.config));
    tracing::debug!(
      target: LOG_TARGET,
      inner_id = id.raw(),
      gating = self.gate.gating(),
      live = self.live.live(),
      queued = self.queue.len(),
      "admitted inner stream"
    );
    self.commands.push_back(GateCommand::SubscribeInner { id, descriptor });
  }

  fn release(&mut self, id: InnerId) {
    if self.gate.release() {
      tracing::trace!(target: LOG_TARGET, inner_id = id.raw(), gating = self.gate.gating(), "released slot");
    }
  }

  fn finish(&mut self, id: InnerId) {
    let _ = self.live.decrement();
    if let Some(mut adapter) = self.adapters.remove(&id) {
      debug_assert!(adapter.is_released(), "completed stream still holds its slot");
      adapter.close();
    }
    tracing::trace!(target: LOG_TARGET, inner_id = id.raw(), live = self.live.live(), "inner stream completed");
    self.commands.push_back(GateCommand::UnsubscribeInner { id });
  }

  fn try_complete(&mut self) {
    let drained = self.gate.gating() == 0 && self.live.is_zero();
    let ready = match self.config.completion_policy() {
      | CompletionPolicy::CountersOnly => drained,
      | CompletionPolicy::AwaitOuter => drained && self.outer_completed && self.queue.is_empty(),
    };
    if !ready {
      return;
    }
    self.state = StreamState::Completed;
    tracing::debug!(target: LOG_TARGET, admitted_total = self.next_inner_id, "gate completed");
    self.commands.push_back(GateCommand::Complete);
    self.teardown();
  }

  fn fail(&mut self, error: StreamError) {
    if self.state != StreamState::Running {
      return;
    }
    self.state = StreamState::Failed;
    self.commands.push_back(GateCommand::Fail(error));
    self.teardown();
  }

  fn teardown(&mut self) {
    if self.outer_subscribed {
      self.outer_subscribed = false;
      self.commands.push_back(GateCommand::UnsubscribeOuter);
    }
    let mut ids: Vec<InnerId> = self.adapters.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
      if let Some(mut adapter) = self.adapters.remove(&id) {
        adapter.close();
      }
      self.commands.push_back(GateCommand::UnsubscribeInner { id });
    }
    let discarded = self.queue.clear();
    if discarded > 0 {
      tracing::debug!(target: LOG_TARGET, discarded, "dropped queued descriptors");
    }
  }
}
