//! Test utilities for deterministic gate scenarios.
//!
//! [`VirtualScheduler`] plays scripted [`ColdSource`]s against a
//! [`ThrottleUntilSome`](super::ThrottleUntilSome) on virtual time, much like
//! marble diagrams: every arrival, element and timer fires at an exact tick.

mod cold_source;
mod recorded_notification;
mod scenario_fuzz_runner;
mod subscription_log;
mod virtual_run;
mod virtual_scheduler;

pub use cold_source::ColdSource;
pub use recorded_notification::RecordedNotification;
pub use scenario_fuzz_runner::ScenarioFuzzRunner;
pub use subscription_log::SubscriptionLog;
pub use virtual_run::VirtualRun;
pub use virtual_scheduler::VirtualScheduler;
