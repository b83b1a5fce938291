//! Admission-limiting multiplexer for streams of inner streams.
//!
//! [`core::ThrottleUntilSome`] consumes a sequence of lazily started inner
//! streams and keeps at most `n` of them subscribed while they have not yet
//! produced their first element. A slot is released on the first element,
//! not on completion, so slow producers never hold back the ones that have
//! already started delivering.
//!
//! The `core` module is `no_std` + `alloc` and contains the event-driven
//! state machine together with deterministic test tooling. The `std` module
//! drives the state machine on tokio for any `futures::Stream` of streams.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

/// Runtime-agnostic state machine, configuration and test tooling.
pub mod core;
/// Tokio driver for `futures::Stream` based inner streams.
#[cfg(feature = "std")]
pub mod std;
