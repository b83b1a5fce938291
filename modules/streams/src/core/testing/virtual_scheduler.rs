use alloc::{
  collections::{BTreeMap, BTreeSet},
  vec::Vec,
};

use super::{ColdSource, RecordedNotification, SubscriptionLog, VirtualRun};
use crate::core::{
  DriveOutcome, GateCommand, InnerId, ManualClock, StreamError, StreamEvent, ThrottleConfig, ThrottleUntilSome,
};


const OUTER_LABEL: &str = "outer";

enum VirtualAction<T> {
  Arrive(ColdSource<T>),
  CompleteOuter,
  FailOuter(StreamError),
  Cancel,
  Inner(InnerId, StreamEvent<T>),
}

/// Deterministic virtual-time harness for [`ThrottleUntilSome`].
///
/// Actions scheduled for the same tick run in the order they were scheduled.
/// Outer actions are registered up front, so they precede inner notifications
/// that become due on the same tick. Timeout guards fire only after every
/// action of their deadline tick has run.
pub struct VirtualScheduler<T> {
  config: ThrottleConfig,
  agenda: BTreeMap<(u64, u64), VirtualAction<T>>,
  seq:    u64,
}

impl<T> VirtualScheduler<T> {
  /// Creates an empty scenario.
  #[must_use]
  pub const fn new(config: ThrottleConfig) -> Self {
    Self { config, agenda: BTreeMap::new(), seq: 0 }
  }

  /// Delivers `source` through the outer sequence at `tick`.
  #[must_use]
  pub fn arrive_at(mut self, tick: u64, source: ColdSource<T>) -> Self {
    self.schedule(tick, VirtualAction::Arrive(source));
    self
  }

  /// Completes the outer sequence at `tick`.
  #[must_use]
  pub fn complete_outer_at(mut self, tick: u64) -> Self {
    self.schedule(tick, VirtualAction::CompleteOuter);
    self
  }

  /// Fails the outer sequence at `tick`.
  #[must_use]
  pub fn fail_outer_at(mut self, tick: u64, error: StreamError) -> Self {
    self.schedule(tick, VirtualAction::FailOuter(error));
    self
  }

  /// Cancels the output on behalf of its consumer at `tick`.
  #[must_use]
  pub fn cancel_at(mut self, tick: u64) -> Self {
    self.schedule(tick, VirtualAction::Cancel);
    self
  }

  /// Runs the scenario until the output terminates, nothing is left to do, or
  /// virtual time passes `until`.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::AlreadyStarted`] if the gate refuses to start.
  pub fn run(mut self, until: u64) -> Result<VirtualRun<T>, StreamError> {
    let clock = ManualClock::new();
    let mut gate: ThrottleUntilSome<ColdSource<T>, T, ManualClock> = ThrottleUntilSome::new(self.config, clock.clone());
    gate.start()?;

    let mut recorder = Recorder {
      notifications: Vec::new(),
      outer:         SubscriptionLog::opened(OUTER_LABEL.into(), 0),
      subscriptions: Vec::new(),
      open:          BTreeMap::new(),
      closed:        BTreeSet::new(),
    };
    let mut now = 0_u64;

    while !gate.state().is_terminal() {
      let next_action = self.agenda.first_key_value().map(|((tick, _), _)| *tick);
      let timer_first = match (gate.next_deadline(), next_action) {
        | (Some(deadline), Some(tick)) => deadline < tick,
        | (Some(_), None) => true,
        | (None, _) => false,
      };

      if timer_first {
        let Some(deadline) = gate.next_deadline() else {
          break;
        };
        if deadline > until {
          break;
        }
        now = now.max(deadline);
        clock.set(now);
        if gate.on_tick() == DriveOutcome::Idle {
          break;
        }
      } else {
        let Some(((tick, _), action)) = self.agenda.pop_first() else {
          break;
        };
        if tick > until {
          break;
        }
        now = now.max(tick);
        clock.set(now);
        match action {
          | VirtualAction::Arrive(source) => {
            let _ = gate.on_outer_next(source);
          },
          | VirtualAction::CompleteOuter => {
            if gate.on_outer_complete() == DriveOutcome::Progressed {
              recorder.outer.close(now);
            }
          },
          | VirtualAction::FailOuter(error) => {
            if gate.on_outer_error(error) == DriveOutcome::Progressed {
              recorder.outer.close(now);
            }
          },
          | VirtualAction::Cancel => {
            let _ = gate.cancel();
          },
          | VirtualAction::Inner(id, event) => {
            if recorder.closed.contains(&id) {
              continue;
            }
            let _ = gate.on_inner_event(id, event);
          },
        }
      }

      while let Some(command) = gate.poll_command() {
        self.execute(command, now, &mut recorder);
      }
    }

    Ok(VirtualRun {
      notifications: recorder.notifications,
      outer:         recorder.outer,
      subscriptions: recorder.subscriptions,
      final_tick:    now,
      snapshot:      gate.snapshot(),
    })
  }

  fn schedule(&mut self, tick: u64, action: VirtualAction<T>) {
    self.agenda.insert((tick, self.seq), action);
    self.seq += 1;
  }

  fn execute(&mut self, command: GateCommand<ColdSource<T>, T>, now: u64, recorder: &mut Recorder<T>) {
    match command {
      | GateCommand::SubscribeInner { id, descriptor } => {
        let (label, script) = descriptor.into_parts();
        recorder.open.insert(id, recorder.subscriptions.len());
        recorder.subscriptions.push(SubscriptionLog::opened(label, now));
        for (offset, event) in script {
          self.schedule(now.saturating_add(offset), VirtualAction::Inner(id, event));
        }
      },
      | GateCommand::UnsubscribeInner { id } => {
        if let Some(index) = recorder.open.remove(&id)
          && let Some(log) = recorder.subscriptions.get_mut(index)
        {
          log.close(now);
        }
        recorder.closed.insert(id);
      },
      | GateCommand::UnsubscribeOuter => recorder.outer.close(now),
      | GateCommand::Emit(value) => {
        recorder.notifications.push(RecordedNotification::new(now, StreamEvent::Next(value)));
      },
      | GateCommand::Complete => recorder.notifications.push(RecordedNotification::new(now, StreamEvent::Complete)),
      | GateCommand::Fail(error) => {
        recorder.notifications.push(RecordedNotification::new(now, StreamEvent::Error(error)));
      },
    }
  }
}

struct Recorder<T> {
  notifications: Vec<RecordedNotification<T>>,
  outer:         SubscriptionLog,
  subscriptions: Vec<SubscriptionLog>,
  open:          BTreeMap<InnerId, usize>,
  closed:        BTreeSet<InnerId>,
}
