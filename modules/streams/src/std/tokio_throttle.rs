//! Tokio driver running a gate over `futures` streams.

use alloc::boxed::Box;
use core::fmt::Display;

use ahash::RandomState;
use futures::{Stream, StreamExt};
use hashbrown::HashMap;
use tokio::{
  runtime::Handle,
  sync::{mpsc, oneshot},
  task::AbortHandle,
  time::Instant,
};

use super::{ThrottledStream, TokioClock, TokioThrottleConfig, gate_event::GateEvent};
use crate::core::{
  GateCommand, InnerId, StreamCompletion, StreamDone, StreamError, StreamEvent, ThrottleUntilSome,
};

#[cfg(test)]
mod tests;

const LOG_TARGET: &str = "firstgate::tokio";

/// Runs [`ThrottleUntilSome`] on the current tokio runtime.
///
/// The outer sequence and every admitted inner stream are polled by their
/// own tasks, which forward notifications to a single driver task over an
/// unbounded channel. The driver owns the gate, so handlers never run
/// concurrently. Timeouts sleep on tokio time using
/// [`TokioThrottleConfig::tick_resolution`].
#[derive(Debug, Clone, Copy)]
pub struct TokioThrottle {
  config: TokioThrottleConfig,
}

impl TokioThrottle {
  /// Creates a driver.
  #[must_use]
  pub const fn new(config: TokioThrottleConfig) -> Self {
    Self { config }
  }

  /// Returns the configuration.
  #[must_use]
  pub const fn config(&self) -> &TokioThrottleConfig {
    &self.config
  }

  /// Subscribes to `outer` and returns the throttled output.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::DriverUnavailable`] when called outside a tokio runtime.
  pub fn run<O, S, T, E, E2>(&self, outer: O) -> Result<ThrottledStream<T>, StreamError>
  where
    O: Stream<Item = Result<S, E>> + Send + 'static,
    S: Stream<Item = Result<T, E2>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    E2: Display + Send + 'static, {
    let runtime = Handle::try_current().map_err(|_| StreamError::DriverUnavailable)?;
    let clock = TokioClock::start(self.config.tick_resolution);
    let mut gate = ThrottleUntilSome::new(self.config.throttle, clock);
    gate.start()?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let completion = StreamCompletion::new();

    let outer_task = runtime.spawn(forward_outer(outer, events_tx.clone())).abort_handle();
    let driver = Driver {
      gate,
      clock,
      runtime: runtime.clone(),
      events_tx,
      output: output_tx,
      outer: Some(outer_task),
      inners: HashMap::with_hasher(RandomState::new()),
      completion: completion.clone(),
    };
    runtime.spawn(driver.run(events_rx, cancel_rx));
    tracing::debug!(target: LOG_TARGET, limit = self.config.throttle.limit(), "throttle driver spawned");
    Ok(ThrottledStream::new(output_rx, cancel_tx, completion))
  }
}

struct Driver<S, T> {
  gate:       ThrottleUntilSome<S, T, TokioClock>,
  clock:      TokioClock,
  runtime:    Handle,
  events_tx:  mpsc::UnboundedSender<GateEvent<S, T>>,
  output:     mpsc::UnboundedSender<Result<T, StreamError>>,
  outer:      Option<AbortHandle>,
  inners:     HashMap<InnerId, AbortHandle, RandomState>,
  completion: StreamCompletion<StreamDone>,
}

impl<S, T, E2> Driver<S, T>
where
  S: Stream<Item = Result<T, E2>> + Send + 'static,
  T: Send + 'static,
  E2: Display + Send + 'static,
{
  async fn run(
    mut self,
    mut events: mpsc::UnboundedReceiver<GateEvent<S, T>>,
    mut cancel: oneshot::Receiver<()>,
  ) {
    let mut cancel_open = true;
    loop {
      self.execute_commands();
      if self.gate.state().is_terminal() {
        break;
      }
      let deadline = self.gate.next_deadline().and_then(|tick| self.clock.instant_at(tick));
      tokio::select! {
        biased;
        _ = &mut cancel, if cancel_open => {
          cancel_open = false;
          tracing::debug!(target: LOG_TARGET, "output cancelled");
          let _ = self.gate.cancel();
        }
        event = events.recv() => {
          let Some(event) = event else {
            break;
          };
          self.apply(event);
        }
        () = sleep_until(deadline) => {
          self.settle_deadline_tick(&mut events).await;
          if !self.gate.state().is_terminal() {
            let _ = self.gate.on_tick();
          }
        }
      }
    }
    self.abort_all();
    tracing::debug!(target: LOG_TARGET, state = ?self.gate.state(), "throttle driver stopped");
  }

  /// Lets forwarders woken on the deadline instant deliver first, so an
  /// element due on the deadline tick beats the timer.
  async fn settle_deadline_tick(&mut self, events: &mut mpsc::UnboundedReceiver<GateEvent<S, T>>) {
    tokio::task::yield_now().await;
    while let Ok(event) = events.try_recv() {
      self.apply(event);
      if self.gate.state().is_terminal() {
        break;
      }
    }
  }

  fn apply(&mut self, event: GateEvent<S, T>) {
    let _ = match event {
      | GateEvent::OuterNext(descriptor) => self.gate.on_outer_next(descriptor),
      | GateEvent::OuterError(error) => self.gate.on_outer_error(error),
      | GateEvent::OuterComplete => self.gate.on_outer_complete(),
      | GateEvent::Inner(id, event) => self.gate.on_inner_event(id, event),
    };
  }

  fn execute_commands(&mut self) {
    while let Some(command) = self.gate.poll_command() {
      match command {
        | GateCommand::SubscribeInner { id, descriptor } => {
          let task = self.runtime.spawn(forward_inner(id, descriptor, self.events_tx.clone()));
          self.inners.insert(id, task.abort_handle());
        },
        | GateCommand::UnsubscribeInner { id } => {
          if let Some(task) = self.inners.remove(&id) {
            task.abort();
          }
        },
        | GateCommand::UnsubscribeOuter => {
          if let Some(task) = self.outer.take() {
            task.abort();
          }
        },
        | GateCommand::Emit(value) => {
          if self.output.send(Ok(value)).is_err() {
            tracing::debug!(target: LOG_TARGET, "output dropped, cancelling");
            let _ = self.gate.cancel();
          }
        },
        | GateCommand::Complete => {
          self.completion.complete(Ok(StreamDone::new()));
        },
        | GateCommand::Fail(error) => {
          tracing::warn!(target: LOG_TARGET, error = %error, "throttled stream failed");
          let _ = self.output.send(Err(error.clone()));
          self.completion.complete(Err(error));
        },
      }
    }
  }

  fn abort_all(&mut self) {
    if let Some(task) = self.outer.take() {
      task.abort();
    }
    for (_, task) in self.inners.drain() {
      task.abort();
    }
  }
}

async fn sleep_until(deadline: Option<Instant>) {
  match deadline {
    | Some(deadline) => tokio::time::sleep_until(deadline).await,
    | None => core::future::pending().await,
  }
}

async fn forward_outer<O, S, T, E>(outer: O, events: mpsc::UnboundedSender<GateEvent<S, T>>)
where
  O: Stream<Item = Result<S, E>>,
  E: Display, {
  let mut outer = Box::pin(outer);
  while let Some(item) = outer.next().await {
    let event = match item {
      | Ok(descriptor) => GateEvent::OuterNext(descriptor),
      | Err(error) => GateEvent::OuterError(StreamError::outer(error)),
    };
    let failed = matches!(event, GateEvent::OuterError(_));
    if events.send(event).is_err() || failed {
      return;
    }
  }
  let _ = events.send(GateEvent::OuterComplete);
}

async fn forward_inner<S, T, E>(id: InnerId, inner: S, events: mpsc::UnboundedSender<GateEvent<S, T>>)
where
  S: Stream<Item = Result<T, E>>,
  E: Display, {
  let mut inner = Box::pin(inner);
  while let Some(item) = inner.next().await {
    let event = match item {
      | Ok(value) => StreamEvent::Next(value),
      | Err(error) => StreamEvent::Error(StreamError::inner(error)),
    };
    let failed = event.is_terminal();
    if events.send(GateEvent::Inner(id, event)).is_err() || failed {
      return;
    }
  }
  let _ = events.send(GateEvent::Inner(id, StreamEvent::Complete));
}
