/// Admission queue for descriptors waiting for a slot.
mod admission_queue;
/// Clock abstraction used by timeout guards.
mod clock;
/// Completion polling types.
mod completion;
/// Completion policy selection.
mod completion_policy;
/// Drive outcome enums.
mod drive_outcome;
/// Commands emitted by the gate for its driver.
mod gate_command;
/// Point-in-time view of the gate.
mod gate_snapshot;
/// Identifier of admitted inner streams.
mod inner_id;
/// Internal listener signal.
mod inner_signal;
/// Listener actions produced by the adapter.
mod listener_action;
/// Live-stream counter.
mod live_counter;
/// Manually advanced clock.
mod manual_clock;
/// Release-gated counter.
mod release_gate;
/// Stream adapter holding the shared subscription of one inner stream.
mod stream_adapter;
/// Stream completion handle.
mod stream_completion;
/// Stream completion marker.
mod stream_done;
/// Configuration argument errors.
mod stream_dsl_error;
/// Stream error definitions.
mod stream_error;
/// Notifications flowing through the gate.
mod stream_event;
/// Internal listeners attached to a shared subscription.
mod stream_listener;
/// Stream state enum.
mod stream_state;
/// Test utilities for deterministic scenarios.
pub mod testing;
/// Gate configuration.
mod throttle_config;
/// Admission-limiting multiplexer.
mod throttle_until_some;
/// Timeout guard of one admitted stream.
mod timeout_guard;
/// Timeout guard modes.
mod timeout_mode;

pub use admission_queue::AdmissionQueue;
pub use clock::Clock;
pub use completion::Completion;
pub use completion_policy::CompletionPolicy;
pub use drive_outcome::DriveOutcome;
pub use gate_command::GateCommand;
pub use gate_snapshot::GateSnapshot;
pub use inner_id::InnerId;
pub use live_counter::LiveCounter;
pub use manual_clock::ManualClock;
pub use release_gate::ReleaseGate;
pub use stream_completion::StreamCompletion;
pub use stream_done::StreamDone;
pub use stream_dsl_error::StreamDslError;
pub use stream_error::StreamError;
pub use stream_event::StreamEvent;
pub use stream_state::StreamState;
pub use throttle_config::ThrottleConfig;
pub use throttle_until_some::ThrottleUntilSome;
pub use timeout_guard::TimeoutGuard;
pub use timeout_mode::TimeoutMode;
