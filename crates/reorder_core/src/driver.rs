//! Settle driver
//!
//! Settle animations are poll-driven ([`ReorderList::tick`]). Hosts with their
//! own animation-frame callback call `tick` from there. Hosts without one can
//! spawn a [`SettleDriver`], which ticks a shared list on a fixed interval
//! until no row is settling anymore.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::list::ReorderList;
use crate::viewport::Viewport;

/// A list shared between the gesture handler and animation tasks
pub type SharedReorderList<V, R> = Arc<Mutex<ReorderList<V, R>>>;

/// Interval-based frame source for settle animations
pub struct SettleDriver;

impl SettleDriver {
    /// Tick `list` every `interval` until its settle animation finishes.
    pub fn spawn<V, R>(list: SharedReorderList<V, R>, interval: Duration) -> JoinHandle<()>
    where
        V: Viewport,
        R: Send + 'static,
    {
        tokio::spawn(Self::run(list, interval))
    }

    pub async fn run<V, R>(list: SharedReorderList<V, R>, interval: Duration)
    where
        V: Viewport,
        R: Send + 'static,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();
        let mut frames = 0u32;

        loop {
            ticker.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            let still_running = match list.lock() {
                Ok(mut list) => list.tick(dt),
                Err(_) => false,
            };
            if !still_running {
                break;
            }
            frames += 1;
        }
        tracing::debug!(frames, "settle driver finished");
    }
}
