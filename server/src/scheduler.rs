use std::time::Duration;

use snake_common::GamePhase;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fixed-period tick source that exists only while the game is running.
///
/// Suspending drops the interval, so nothing scheduled before a pause or
/// reset can fire afterwards. Resuming starts a fresh period and never
/// catches up on time spent suspended.
pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn resume(&mut self) {
        if self.interval.is_some() {
            return;
        }

        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn suspend(&mut self) {
        self.interval = None;
    }

    pub fn sync(&mut self, phase: GamePhase) {
        if phase == GamePhase::Running {
            self.resume();
        } else {
            self.suspend();
        }
    }

    /// Resolves on the next tick; never resolves while suspended.
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
