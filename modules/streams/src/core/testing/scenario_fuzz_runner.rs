use alloc::{borrow::Cow, format, vec::Vec};

use super::{ColdSource, VirtualScheduler};
use crate::core::ThrottleConfig;


/// Deterministic generator of randomized gate scenarios.
///
/// Source `i` is labelled `s{i}`, emits `i` once after its delay and then
/// completes. Arrival ticks never decrease, and the outer sequence completes
/// right after the last arrival.
pub struct ScenarioFuzzRunner {
  state: u64,
}

impl ScenarioFuzzRunner {
  /// Creates a new runner with a deterministic seed.
  #[must_use]
  pub const fn new(seed: u64) -> Self {
    Self { state: seed }
  }

  const fn next_u32(&mut self) -> u32 {
    self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
    (self.state >> 32) as u32
  }

  const fn next_below(&mut self, bound: u64) -> u64 {
    if bound == 0 {
      return 0;
    }
    self.next_u32() as u64 % bound
  }

  /// Generates `arrivals` pairs of `(arrival_tick, delay)`.
  ///
  /// Consecutive arrivals are at most `max_gap` ticks apart and every delay
  /// is at most `max_delay`.
  pub fn plan(&mut self, arrivals: usize, max_gap: u64, max_delay: u64) -> Vec<(u64, u64)> {
    let mut tick = 0_u64;
    let mut plan = Vec::with_capacity(arrivals);
    for _ in 0..arrivals {
      tick = tick.saturating_add(self.next_below(max_gap.saturating_add(1)));
      let delay = self.next_below(max_delay.saturating_add(1));
      plan.push((tick, delay));
    }
    plan
  }

  /// Builds the scenario described by `plan`.
  #[must_use]
  pub fn scenario(config: ThrottleConfig, plan: &[(u64, u64)]) -> VirtualScheduler<u32> {
    let last_arrival = plan.last().map_or(0, |(tick, _)| *tick);
    plan
      .iter()
      .enumerate()
      .fold(VirtualScheduler::new(config), |scheduler, (index, (tick, delay))| {
        let label: Cow<'static, str> = Cow::Owned(format!("s{index}"));
        let value = u32::try_from(index).unwrap_or(u32::MAX);
        scheduler.arrive_at(*tick, ColdSource::single_after(label, *delay, value))
      })
      .complete_outer_at(last_arrival)
  }
}
