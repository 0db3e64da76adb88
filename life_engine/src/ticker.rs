// ticker.rs - Repeating step scheduling, kept outside the engine

use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;

use crate::engine::Simulation;

pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A start/stop timer for frame-driven UIs.
///
/// Nothing runs on its own: the owner calls [`Ticker::poll`] once per frame
/// and steps the simulation when it returns true.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    running: bool,
    last_tick: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            running: false,
            last_tick: Instant::now(),
        }
    }

    /// Begin ticking; the first tick is due one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last_tick = now;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period.max(MIN_PERIOD);
    }

    /// True when a full period has passed since the last tick. Fires at most
    /// once per call; missed periods are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if now.saturating_duration_since(self.last_tick) >= self.period {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    /// Time left until the next tick, or `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.running.then(|| {
            self.period
                .saturating_sub(now.saturating_duration_since(self.last_tick))
        })
    }
}

/// Step `sim` once per `period` until `should_stop` says otherwise.
///
/// `should_stop` is checked before every step, so a simulation that already
/// satisfies it is never stepped. Returns how many steps were taken.
pub async fn run_steps<F>(sim: &mut Simulation, period: Duration, mut should_stop: F) -> u64
where
    F: FnMut(&Simulation) -> bool,
{
    let mut interval = tokio::time::interval(period.max(MIN_PERIOD));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    let mut steps = 0;
    while !should_stop(sim) {
        interval.tick().await;
        sim.step();
        steps += 1;
    }
    steps
}
