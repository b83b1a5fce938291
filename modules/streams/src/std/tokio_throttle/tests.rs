use alloc::{sync::Arc, vec, vec::Vec};
use core::{convert::Infallible, time::Duration};

use futures::{
  StreamExt,
  stream::{self, BoxStream},
};
use portable_atomic::{AtomicUsize, Ordering};
use tokio::time::Instant;

use super::TokioThrottle;
use crate::{
  core::{Completion, StreamDone, StreamError, ThrottleConfig},
  std::TokioThrottleConfig,
};

type Inner<T, E> = BoxStream<'static, Result<T, E>>;

fn delayed<T: Send + 'static>(delay_ms: u64, value: T) -> Inner<T, Infallible> {
  stream::once(async move {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Ok(value)
  })
  .boxed()
}

fn arrivals<T: Send + 'static, E: Send + 'static>(
  plan: Vec<(u64, Inner<T, E>)>,
) -> BoxStream<'static, Result<Inner<T, E>, Infallible>> {
  let origin = Instant::now();
  stream::iter(plan)
    .then(move |(at, inner)| async move {
      tokio::time::sleep_until(origin + Duration::from_millis(at)).await;
      Ok(inner)
    })
    .boxed()
}

fn config(limit: usize) -> TokioThrottleConfig {
  TokioThrottleConfig::new(ThrottleConfig::new(limit).expect("limit"))
}

struct DropProbe(Arc<AtomicUsize>);

impl Drop for DropProbe {
  fn drop(&mut self) {
    self.0.fetch_add(1, Ordering::SeqCst);
  }
}

#[tokio::test(start_paused = true)]
async fn forwards_first_elements_in_release_order() {
  let origin = Instant::now();
  let outer = arrivals(vec![
    (1, delayed(2, 'a')),
    (2, delayed(7, 'b')),
    (3, delayed(11, 'c')),
    (4, delayed(13, 'd')),
    (5, delayed(17, 'e')),
  ]);
  let mut output = TokioThrottle::new(config(3)).run(outer).expect("run");
  let completion = output.completion();

  let mut seen = Vec::new();
  while let Some(item) = output.next().await {
    seen.push((origin.elapsed().as_millis(), item.expect("element")));
  }

  assert_eq!(seen, vec![(3, 'a'), (9, 'b'), (14, 'c'), (17, 'd'), (26, 'e')]);
  assert_eq!(completion.poll(), Completion::Ready(Ok(StreamDone::new())));
}

#[tokio::test(start_paused = true)]
async fn silent_inner_stream_times_out() {
  let throttle = ThrottleConfig::new(1).expect("limit").with_timeout_ticks(10).expect("timeout");
  let outer = arrivals::<u32, Infallible>(vec![(0, stream::pending().boxed()), (1, delayed(1, 7))]);
  let origin = Instant::now();
  let mut output = TokioThrottle::new(TokioThrottleConfig::new(throttle)).run(outer).expect("run");

  assert_eq!(output.next().await, Some(Err(StreamError::Timeout { ticks: 10 })));
  assert_eq!(origin.elapsed(), Duration::from_millis(10));
  assert_eq!(output.next().await, None);
  assert_eq!(output.completion().poll(), Completion::Ready(Err(StreamError::Timeout { ticks: 10 })));
}

#[tokio::test(start_paused = true)]
async fn inner_failure_is_forwarded_once() {
  let failing: Inner<u32, &'static str> = stream::once(async { Err("boom") }).boxed();
  let slow: Inner<u32, &'static str> = stream::once(async {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(1)
  })
  .boxed();
  let outer = arrivals(vec![(0, slow), (1, failing)]);
  let output = TokioThrottle::new(config(2)).run(outer).expect("run");

  let items: Vec<Result<u32, StreamError>> = output.collect().await;
  assert_eq!(items, vec![Err(StreamError::inner("boom"))]);
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_every_subscription() {
  let dropped = Arc::new(AtomicUsize::new(0));
  let probe_stream = |dropped: Arc<AtomicUsize>| -> Inner<u32, Infallible> {
    stream::unfold(DropProbe(dropped), |probe| async move {
      futures::future::pending::<()>().await;
      Some((Ok(0), probe))
    })
    .boxed()
  };
  let outer = arrivals(vec![
    (0, probe_stream(dropped.clone())),
    (0, probe_stream(dropped.clone())),
    (0, probe_stream(dropped.clone())),
  ]);
  let mut output = TokioThrottle::new(config(2)).run(outer).expect("run");
  let completion = output.completion();

  tokio::time::sleep(Duration::from_millis(5)).await;
  output.cancel();
  assert_eq!(output.next().await, None);
  tokio::time::sleep(Duration::from_millis(1)).await;

  // two admitted streams plus the queued one
  assert_eq!(dropped.load(Ordering::SeqCst), 3);
  assert_eq!(completion.poll(), Completion::Pending);
}

#[test]
fn run_requires_a_tokio_runtime() {
  let outer = stream::empty::<Result<Inner<u32, Infallible>, Infallible>>();
  let result = TokioThrottle::new(config(1)).run(outer);
  assert!(matches!(result, Err(StreamError::DriverUnavailable)));
}

#[tokio::test(start_paused = true)]
async fn stream_admitted_mid_tick_gets_its_full_timeout() {
  let throttle = ThrottleConfig::new(1).expect("limit").with_timeout_ticks(3).expect("timeout");
  let config = TokioThrottleConfig::new(throttle).with_tick_resolution(Duration::from_millis(100));
  let origin = Instant::now();
  let outer = arrivals(vec![(150, delayed(280, 1_u32))]);
  let mut output = TokioThrottle::new(config).run(outer).expect("run");

  assert_eq!(output.next().await, Some(Ok(1)));
  assert_eq!(origin.elapsed(), Duration::from_millis(430));
}

#[tokio::test(start_paused = true)]
async fn silent_stream_admitted_mid_tick_times_out_on_the_next_boundary_after_its_timeout() {
  let throttle = ThrottleConfig::new(1).expect("limit").with_timeout_ticks(3).expect("timeout");
  let config = TokioThrottleConfig::new(throttle).with_tick_resolution(Duration::from_millis(100));
  let origin = Instant::now();
  let outer = arrivals::<u32, Infallible>(vec![(150, stream::pending().boxed())]);
  let mut output = TokioThrottle::new(config).run(outer).expect("run");

  assert_eq!(output.next().await, Some(Err(StreamError::Timeout { ticks: 3 })));
  assert_eq!(origin.elapsed(), Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn element_due_on_the_deadline_instant_beats_the_timer() {
  let origin = Instant::now();
  let outer = arrivals(vec![(1, delayed(3000, 7_u32))]);
  let mut output = TokioThrottle::new(config(1)).run(outer).expect("run");

  assert_eq!(output.next().await, Some(Ok(7)));
  assert_eq!(origin.elapsed(), Duration::from_millis(3001));
  assert_eq!(output.next().await, None);
  assert_eq!(output.completion().poll(), Completion::Ready(Ok(StreamDone::new())));
}
