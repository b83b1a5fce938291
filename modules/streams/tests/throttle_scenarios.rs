use firstgate_streams_rs::core::{
  CompletionPolicy, StreamError, StreamEvent, StreamState, ThrottleConfig, TimeoutMode,
  testing::{ColdSource, RecordedNotification, ScenarioFuzzRunner, VirtualRun, VirtualScheduler},
};

fn await_outer(limit: usize) -> ThrottleConfig {
  ThrottleConfig::new(limit).expect("limit").with_completion_policy(CompletionPolicy::AwaitOuter)
}

fn fuzz_run(seed: u64, limit: usize, arrivals: usize) -> (Vec<(u64, u64)>, VirtualRun<u32>) {
  let plan = ScenarioFuzzRunner::new(seed).plan(arrivals, 6, 40);
  let run = ScenarioFuzzRunner::scenario(await_outer(limit), &plan).run(1_000_000).expect("run");
  (plan, run)
}

#[test]
fn gating_never_exceeds_the_limit() {
  for limit in 1..=4 {
    for seed in 0..32 {
      let (_, run) = fuzz_run(seed, limit, 64);
      assert!(run.snapshot().peak_gating() <= limit, "seed {seed} limit {limit}");
      assert_eq!(run.state(), StreamState::Completed, "seed {seed} limit {limit}");
      assert_eq!(run.snapshot().gating(), 0);
      assert_eq!(run.snapshot().live(), 0);
    }
  }
}

#[test]
fn admission_follows_arrival_order() {
  for seed in 100..116 {
    let (plan, run) = fuzz_run(seed, 2, 48);
    let expected: Vec<String> = (0..plan.len()).map(|index| format!("s{index}")).collect();
    assert_eq!(run.admission_order(), expected, "seed {seed}");
  }
}

#[test]
fn limit_of_one_admits_strictly_sequentially() {
  for seed in 7..23 {
    let (plan, run) = fuzz_run(seed, 1, 32);
    let logs = run.subscriptions();
    assert_eq!(logs.len(), plan.len());
    for index in 1..plan.len() {
      let previous_release = logs[index - 1].subscribed_at() + plan[index - 1].1;
      let expected = plan[index].0.max(previous_release);
      assert_eq!(logs[index].subscribed_at(), expected, "seed {seed} source {index}");
    }
    assert_eq!(run.snapshot().peak_gating(), 1);
  }
}

#[test]
fn every_value_is_forwarded_exactly_once() {
  let (plan, run) = fuzz_run(99, 3, 128);
  let mut values: Vec<u32> = run.elements().into_iter().map(|(_, value)| *value).collect();
  values.sort_unstable();
  let expected: Vec<u32> = (0..plan.len()).map(|index| u32::try_from(index).expect("index")).collect();
  assert_eq!(values, expected);
  assert!(run.all_unsubscribed());
}

#[test]
fn simultaneous_arrivals_complete_with_the_slowest_stream() {
  let run = VirtualScheduler::new(ThrottleConfig::new(4).expect("limit"))
    .arrive_at(1, ColdSource::single_after("a", 5, "a"))
    .arrive_at(1, ColdSource::single_after("b", 3, "b"))
    .run(1_000)
    .expect("run");

  assert_eq!(run.notifications(), &[
    RecordedNotification::new(4, StreamEvent::Next("b")),
    RecordedNotification::new(6, StreamEvent::Next("a")),
    RecordedNotification::new(6, StreamEvent::Complete),
  ]);
  assert!(run.all_unsubscribed());
}

#[test]
fn queued_stream_waits_for_a_first_element() {
  let run = VirtualScheduler::new(ThrottleConfig::new(3).expect("limit"))
    .arrive_at(1, ColdSource::single_after("a", 2, 'a'))
    .arrive_at(2, ColdSource::single_after("b", 7, 'b'))
    .arrive_at(3, ColdSource::single_after("c", 11, 'c'))
    .arrive_at(4, ColdSource::single_after("d", 13, 'd'))
    .arrive_at(5, ColdSource::single_after("e", 17, 'e'))
    .run(1_000)
    .expect("run");

  assert_eq!(run.elements(), vec![(3, &'a'), (9, &'b'), (14, &'c'), (17, &'d'), (26, &'e')]);
  assert_eq!(run.terminal(), Some(&RecordedNotification::new(26, StreamEvent::Complete)));
  assert_eq!(run.subscription("e").map(|log| log.subscribed_at()), Some(9));
}

#[test]
fn timeout_stops_admission_and_emission() {
  let config = ThrottleConfig::new(2).expect("limit").with_timeout_ticks(100).expect("timeout");
  let run = VirtualScheduler::new(config)
    .arrive_at(0, ColdSource::new("silent"))
    .arrive_at(0, ColdSource::new("slow").next_at(150, 1_u8).complete_at(151))
    .arrive_at(10, ColdSource::single_after("queued", 1, 2_u8))
    .run(10_000)
    .expect("run");

  assert_eq!(run.notifications(), &[RecordedNotification::new(100, StreamEvent::Error(StreamError::Timeout {
    ticks: 100,
  }))]);
  assert_eq!(run.admission_order(), vec!["silent", "slow"]);
  assert!(run.all_unsubscribed());
}

#[test]
fn idle_timeout_rearms_after_every_element() {
  let config = ThrottleConfig::new(1)
    .expect("limit")
    .with_timeout_ticks(10)
    .expect("timeout")
    .with_timeout_mode(TimeoutMode::Idle);
  let run = VirtualScheduler::new(config)
    .arrive_at(0, ColdSource::new("ticker").next_at(8, 1_u8).next_at(16, 2).next_at(30, 3))
    .run(1_000)
    .expect("run");

  assert_eq!(run.elements(), vec![(8, &1), (16, &2)]);
  assert_eq!(run.terminal(), Some(&RecordedNotification::new(26, StreamEvent::Error(StreamError::Timeout {
    ticks: 10,
  }))));
}

#[test]
fn counters_only_completes_between_arrivals() {
  let run = VirtualScheduler::new(ThrottleConfig::new(2).expect("limit"))
    .arrive_at(0, ColdSource::single_after("a", 1, 1_u8))
    .arrive_at(10, ColdSource::single_after("b", 1, 2_u8))
    .run(1_000)
    .expect("run");

  assert_eq!(run.elements(), vec![(1, &1)]);
  assert_eq!(run.terminal(), Some(&RecordedNotification::new(1, StreamEvent::Complete)));
  assert_eq!(run.admission_order(), vec!["a"]);
}

#[test]
fn cancellation_leaves_no_dangling_subscriptions() {
  let run = VirtualScheduler::new(ThrottleConfig::new(3).expect("limit"))
    .arrive_at(0, ColdSource::new("a").next_at(5, 1_u8))
    .arrive_at(1, ColdSource::new("b"))
    .arrive_at(2, ColdSource::new("c"))
    .arrive_at(3, ColdSource::new("d"))
    .cancel_at(20)
    .run(1_000)
    .expect("run");

  assert_eq!(run.elements(), vec![(5, &1)]);
  assert_eq!(run.state(), StreamState::Cancelled);
  assert_eq!(run.admission_order(), vec!["a", "b", "c", "d"]);
  assert!(run.subscriptions().iter().all(|log| log.unsubscribed_at() == Some(20)));
  assert!(run.all_unsubscribed());
}
