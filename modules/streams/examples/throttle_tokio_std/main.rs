#![allow(clippy::print_stdout)]

use std::time::Duration;

use anyhow::{Result, anyhow};
use firstgate_streams_rs::{
  core::{Completion, ThrottleConfig},
  std::{ThrottleUntilSomeExt, TokioThrottleConfig},
};
use futures::{
  StreamExt,
  stream::{self, BoxStream},
};
use tokio::time::Instant;

type Lookup = BoxStream<'static, Result<String, String>>;

fn lookup(name: &'static str, latency: Duration) -> Lookup {
  stream::once(async move {
    tokio::time::sleep(latency).await;
    Ok(format!("{name} resolved"))
  })
  .boxed()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let lookups = vec![
    lookup("alpha", Duration::from_millis(40)),
    lookup("beta", Duration::from_millis(10)),
    lookup("gamma", Duration::from_millis(25)),
    lookup("delta", Duration::from_millis(5)),
  ];
  let outer = stream::iter(lookups).map(Ok::<_, String>);

  let throttle = ThrottleConfig::new(2)?.with_timeout_ticks(500)?;
  let mut output = outer.throttle_until_some(TokioThrottleConfig::new(throttle))?;
  let completion = output.completion();

  let origin = Instant::now();
  while let Some(item) = output.next().await {
    let value = item?;
    println!("{:>4} ms  {value}", origin.elapsed().as_millis());
  }

  match completion.poll() {
    | Completion::Ready(result) => {
      result?;
      println!("all lookups finished");
      Ok(())
    },
    | Completion::Pending => Err(anyhow!("output ended without completing")),
  }
}
