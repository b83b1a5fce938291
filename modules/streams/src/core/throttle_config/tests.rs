use super::ThrottleConfig;
use crate::core::{CompletionPolicy, StreamDslError, TimeoutMode};

#[test]
fn zero_limit_is_rejected() {
  assert_eq!(
    ThrottleConfig::new(0),
    Err(StreamDslError::InvalidArgument { name: "limit", value: 0, reason: "must be greater than zero" })
  );
}

#[test]
fn defaults_follow_first_emission_semantics() {
  let config = ThrottleConfig::new(4).expect("config");
  assert_eq!(config.limit(), 4);
  assert_eq!(config.timeout_ticks(), ThrottleConfig::DEFAULT_TIMEOUT_TICKS);
  assert_eq!(config.timeout_mode(), TimeoutMode::FirstEmission);
  assert_eq!(config.completion_policy(), CompletionPolicy::CountersOnly);
}

#[test]
fn builders_update_each_setting() {
  let config = ThrottleConfig::new(1)
    .and_then(|config| config.with_timeout_ticks(25))
    .expect("config")
    .with_timeout_mode(TimeoutMode::Idle)
    .with_completion_policy(CompletionPolicy::AwaitOuter);
  assert_eq!(config.timeout_ticks(), 25);
  assert_eq!(config.timeout_mode(), TimeoutMode::Idle);
  assert_eq!(config.completion_policy(), CompletionPolicy::AwaitOuter);
}

#[test]
fn zero_timeout_is_rejected() {
  let result = ThrottleConfig::new(1).and_then(|config| config.with_timeout_ticks(0));
  assert!(matches!(result, Err(StreamDslError::InvalidArgument { name: "timeout_ticks", .. })));
}

#[test]
fn timeout_ticks_use_the_full_tick_range() {
  let config = ThrottleConfig::new(1).and_then(|config| config.with_timeout_ticks(u64::MAX)).expect("config");
  assert_eq!(config.timeout_ticks(), u64::MAX);
}
