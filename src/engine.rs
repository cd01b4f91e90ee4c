//! Engine - realtime and offline execution loops
//!
//! The engine owns a [`SortScheduler`] and decides when its pending tick is due.
//! - Realtime: sleeps with spin_sleep until the tick's wall-clock deadline
//! - Offline: jumps the logical clock straight to each deadline, so a whole
//!   sort plays out instantly with the same timestamps it would have live

use crate::error::Result;
use crate::observer::StepObserver;
use crate::scheduler::{SortScheduler, TickOutcome};
use crate::step::Value;
use serde::{Deserialize, Serialize};
use spin_sleep::SpinSleeper;
use std::time::Duration;

pub use crate::scheduler::SchedulerMode;

/// Configuration for launching the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Playback speed in `[1, 100]`; ticks are `max(5ms, 1000ms / speed)` apart.
    pub speed: u32,
    /// Realtime dilation factor. Ignored offline.
    pub rate: f64,
    /// Seed for generating shuffled inputs.
    pub seed: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: 50,
            rate: 1.0,
            seed: "default".to_string(),
        }
    }
}

/// Drives one scheduler against a clock.
pub struct Engine {
    pub scheduler: SortScheduler,
    sleeper: SpinSleeper,
}

impl Engine {
    /// Create a new engine with the given mode and configuration.
    pub fn new(mode: SchedulerMode, config: &EngineConfig) -> Self {
        let mut scheduler = SortScheduler::new(mode);
        scheduler.set_speed(config.speed);
        if mode == SchedulerMode::Realtime {
            scheduler.clock_mut().set_rate(config.rate);
        }

        Self {
            scheduler,
            sleeper: SpinSleeper::default(),
        }
    }

    pub fn subscribe(&mut self, observer: impl StepObserver + 'static) {
        self.scheduler.subscribe(observer);
    }

    /// See [`SortScheduler::start`].
    ///
    /// # Errors
    /// Unknown algorithm identifier.
    pub fn start(&mut self, algorithm: &str, input: &[Value]) -> Result<()> {
        self.scheduler.start(algorithm, input)
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.scheduler.set_speed(speed);
    }

    /// Run until `is_done` holds or nothing is scheduled any more
    /// (completed, paused, or idle). Realtime sleeps until each tick is due;
    /// offline jumps the clock to it.
    pub fn run_until<F>(&mut self, is_done: F)
    where
        F: Fn(&SortScheduler) -> bool,
    {
        loop {
            if is_done(&self.scheduler) {
                break;
            }

            let Some(next_t) = self.scheduler.next_tick_time() else {
                break;
            };

            let now = self.scheduler.now();
            if next_t <= now {
                self.scheduler.tick();
                continue;
            }

            if self.scheduler.clock().mode == SchedulerMode::Offline {
                self.scheduler.clock_mut().advance_offline(next_t);
                continue;
            }

            // Sleep until due
            let rate = self.scheduler.clock().rate();
            let dt_wall = ((next_t - now) / rate).max(0.0);
            self.sleeper.sleep(Duration::from_secs_f64(dt_wall));
        }
    }

    /// Run until the current sort completes.
    pub fn run_until_complete(&mut self) {
        self.run_until(SortScheduler::is_completed);
    }

    /// Advance offline time to `target`, firing every tick due on the way.
    pub fn advance_to(&mut self, target: f64) {
        let target = target.max(0.0);

        while let Some(next_t) = self.scheduler.next_tick_time() {
            if next_t > target {
                break;
            }
            self.scheduler.clock_mut().advance_offline(next_t);
            self.scheduler.tick();
        }

        self.scheduler.clock_mut().advance_offline(target);
    }

    /// Step by a number of seconds (offline mode).
    pub fn step_sec(&mut self, dt: f64) {
        let s = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let target = self.scheduler.now() + s;
        self.advance_to(target);
    }

    /// Fire up to `n` ticks, jumping the clock to each one's due time
    /// (offline mode). Returns how many ticks actually ran.
    pub fn step_ticks(&mut self, n: usize) -> usize {
        let mut fired = 0;
        while fired < n {
            let Some(next_t) = self.scheduler.next_tick_time() else {
                break;
            };
            self.scheduler.clock_mut().advance_offline(next_t);
            self.scheduler.tick();
            fired += 1;
        }
        fired
    }

    /// Fire ticks until the sort completes or stops being scheduled
    /// (offline mode). Returns the final tick outcome, if any tick ran.
    pub fn run_offline(&mut self) -> Option<TickOutcome> {
        let mut last = None;
        while let Some(next_t) = self.scheduler.next_tick_time() {
            self.scheduler.clock_mut().advance_offline(next_t);
            last = Some(self.scheduler.tick());
        }
        last
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
