//! Runs the poll scheduler on a tokio interval.

use fnet_infrastructure::PollScheduler;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Polls `scheduler` every `period` until `done` resolves or Ctrl-C is
/// pressed. Returns `None` when interrupted.
pub async fn drive_until<F>(
    scheduler: &PollScheduler,
    period: Duration,
    done: F,
) -> Option<F::Output>
where
    F: Future,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(done);
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;
            output = &mut done => return Some(output),
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                return None;
            }
            _ = ticker.tick() => scheduler.run_pass(),
        }
    }
}
