//! Tokio driver for the gate.

mod gate_event;
mod throttle_until_some_ext;
mod throttled_stream;
mod tokio_clock;
mod tokio_throttle;
mod tokio_throttle_config;

pub use throttle_until_some_ext::ThrottleUntilSomeExt;
pub use throttled_stream::ThrottledStream;
pub use tokio_clock::TokioClock;
pub use tokio_throttle::TokioThrottle;
pub use tokio_throttle_config::TokioThrottleConfig;
