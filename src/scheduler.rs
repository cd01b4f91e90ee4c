//! Sort Scheduler
//!
//! Owns the active run and its control surface (`start` / `pause` / `reset`).
//! Each tick resumes the run's [`StepEngine`](crate::executor::StepEngine)
//! once, republishes the step and books the next tick `max(5ms, 1000ms / speed)`
//! after the step has been published, on the logical clock.
//!
//! The scheduler never sleeps. Something else (see [`crate::engine`]) decides
//! when the pending tick is due and calls [`SortScheduler::tick`].

use crate::catalog::{describe, AlgorithmDescriptor, AlgorithmId};
use crate::error::Result;
use crate::executor::StepEngine;
use crate::observer::{RunSummary, StepEvent, StepObserver};
use crate::step::Value;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Slowest and fastest accepted speed settings.
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 100;

/// Floor on the delay between two ticks, in seconds.
pub const MIN_TICK_DELAY_SEC: f64 = 0.005;

/// Delay between ticks for a speed setting, in seconds.
pub fn tick_delay_sec(speed: u32) -> f64 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    (1.0 / f64::from(speed)).max(MIN_TICK_DELAY_SEC)
}

/// Scheduler clock mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerMode {
    Realtime,
    Offline,
}

/// Logical clock in seconds.
///
/// Realtime reads the wall clock scaled by `rate`; offline only moves when
/// told to.
#[derive(Clone, Debug)]
pub struct Clock {
    pub mode: SchedulerMode,
    rate: f64,
    wall_anchor: Instant,
    logical_anchor: f64,
    offline_now: f64,
}

impl Clock {
    pub fn new(mode: SchedulerMode) -> Self {
        Self {
            mode,
            rate: 1.0,
            wall_anchor: Instant::now(),
            logical_anchor: 0.0,
            offline_now: 0.0,
        }
    }

    /// Current logical time.
    pub fn now(&self) -> f64 {
        match self.mode {
            SchedulerMode::Offline => self.offline_now,
            SchedulerMode::Realtime => {
                let dt = self.wall_anchor.elapsed().as_secs_f64();
                self.logical_anchor + dt * self.rate
            }
        }
    }

    /// Set the time dilation rate (realtime only).
    pub fn set_rate(&mut self, rate: f64) {
        if self.mode == SchedulerMode::Offline {
            return;
        }
        let r = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            1.0
        };
        self.logical_anchor = self.now();
        self.wall_anchor = Instant::now();
        self.rate = r;
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Move offline time forward. Never moves backwards; ignored in realtime.
    pub fn advance_offline(&mut self, t: f64) {
        if self.mode == SchedulerMode::Offline && t > self.offline_now {
            self.offline_now = t;
        }
    }
}

/// Where the control state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// What a call to [`SortScheduler::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A step was published.
    Stepped,
    /// The procedure had no steps left; the run is now completed.
    Completed,
    /// Not running; nothing happened.
    Skipped,
}

/// The active run.
struct EngineRunState {
    descriptor: &'static AlgorithmDescriptor,
    engine: StepEngine,
    input: Vec<Value>,
    started_at: f64,
}

/// Control surface and tick loop for one sort at a time.
pub struct SortScheduler {
    clock: Clock,
    phase: RunPhase,
    run: Option<EngineRunState>,
    speed: u32,
    /// Due time of the pending tick, if one is booked.
    next_tick: Option<f64>,

    array: Vec<Value>,
    comparing: Vec<usize>,
    swapping: Vec<usize>,
    steps: u64,
    elapsed_sec: f64,

    observers: Vec<Box<dyn StepObserver>>,
}

impl SortScheduler {
    pub fn new(mode: SchedulerMode) -> Self {
        Self {
            clock: Clock::new(mode),
            phase: RunPhase::Idle,
            run: None,
            speed: 50,
            next_tick: None,
            array: Vec::new(),
            comparing: Vec::new(),
            swapping: Vec::new(),
            steps: 0,
            elapsed_sec: 0.0,
            observers: Vec::new(),
        }
    }

    /// Register an observer for every following step, completion and reset.
    pub fn subscribe(&mut self, observer: impl StepObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Start a run, or resume a paused one.
    ///
    /// - Running: no-op.
    /// - Paused: resumes the same run; `algorithm` and `input` are ignored.
    /// - Idle / Completed: binds a fresh procedure to a private copy of
    ///   `input`, zeroes the counters and books the first tick for now.
    ///
    /// # Errors
    /// [`SortError::UnknownAlgorithm`](crate::error::SortError::UnknownAlgorithm)
    /// if `algorithm` is not registered. The state is left untouched.
    pub fn start(&mut self, algorithm: &str, input: &[Value]) -> Result<()> {
        let descriptor = describe(algorithm)?;
        let now = self.clock.now();

        match self.phase {
            RunPhase::Running => {
                trace!("start ignored: already running");
            }
            RunPhase::Paused => {
                self.phase = RunPhase::Running;
                self.next_tick = Some(now);
                debug!(steps = self.steps, "resumed");
            }
            RunPhase::Idle | RunPhase::Completed => {
                self.run = Some(EngineRunState {
                    descriptor,
                    engine: descriptor.instantiate(input),
                    input: input.to_vec(),
                    started_at: now,
                });
                self.array = input.to_vec();
                self.comparing.clear();
                self.swapping.clear();
                self.steps = 0;
                self.elapsed_sec = 0.0;
                self.phase = RunPhase::Running;
                self.next_tick = Some(now);
                info!(algorithm = %descriptor.id, elements = input.len(), "sort started");
            }
        }
        Ok(())
    }

    /// Pause a running sort, keeping its progress. No-op otherwise.
    pub fn pause(&mut self) {
        if self.phase != RunPhase::Running {
            return;
        }
        self.phase = RunPhase::Paused;
        self.next_tick = None;
        debug!(steps = self.steps, "paused");
    }

    /// Drop the current run (if any) and return to Idle.
    ///
    /// The published array goes back to the discarded run's input.
    pub fn reset(&mut self) {
        self.next_tick = None;
        if let Some(run) = self.run.take() {
            self.array = run.input;
        }
        self.comparing.clear();
        self.swapping.clear();
        self.steps = 0;
        self.elapsed_sec = 0.0;
        self.phase = RunPhase::Idle;

        for o in &mut self.observers {
            o.on_reset();
        }
        debug!("reset");
    }

    /// Change the speed. Takes effect from the next booked tick.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Resume the run by one step.
    ///
    /// Callers normally invoke this once the pending tick is due; calling it
    /// early simply runs the tick early.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != RunPhase::Running {
            return TickOutcome::Skipped;
        }
        let Some(run) = self.run.as_mut() else {
            return TickOutcome::Skipped;
        };

        let now = self.clock.now();
        self.elapsed_sec = now - run.started_at;

        match run.engine.resume() {
            Some(step) => {
                self.steps += 1;
                self.array.clone_from(&step.array);
                self.comparing.clone_from(&step.comparing);
                self.swapping.clone_from(&step.swapping);

                let event = StepEvent {
                    algorithm: run.descriptor.id,
                    index: self.steps,
                    elapsed_sec: self.elapsed_sec,
                    step,
                };
                trace!(index = event.index, comparing = ?event.step.comparing, swapping = ?event.step.swapping, "step");
                for o in &mut self.observers {
                    o.on_step(&event);
                }
                // A late tick never shortens the gap before the next one.
                self.next_tick = Some(self.clock.now() + tick_delay_sec(self.speed));
                TickOutcome::Stepped
            }
            None => {
                self.phase = RunPhase::Completed;
                self.next_tick = None;
                self.comparing.clear();
                self.swapping.clear();

                let summary = RunSummary {
                    algorithm: run.descriptor.id,
                    name: run.descriptor.name,
                    elements: run.input.len(),
                    steps: self.steps,
                    elapsed_sec: self.elapsed_sec,
                };
                info!(
                    algorithm = %summary.algorithm,
                    steps = summary.steps,
                    elapsed_sec = summary.elapsed_sec,
                    "sort completed"
                );
                for o in &mut self.observers {
                    o.on_complete(&summary);
                }
                TickOutcome::Completed
            }
        }
    }

    /// Due time of the pending tick. `None` unless running.
    pub fn next_tick_time(&self) -> Option<f64> {
        self.next_tick
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RunPhase::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.phase == RunPhase::Completed
    }

    /// Algorithm of the current (or just completed) run.
    pub fn algorithm(&self) -> Option<AlgorithmId> {
        self.run.as_ref().map(|r| r.descriptor.id)
    }

    /// Last published array contents.
    pub fn array(&self) -> &[Value] {
        &self.array
    }

    pub fn comparing(&self) -> &[usize] {
        &self.comparing
    }

    pub fn swapping(&self) -> &[usize] {
        &self.swapping
    }

    /// Steps published in this run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Same as [`steps`](Self::steps): every step counts, mutations included.
    pub fn comparisons(&self) -> u64 {
        self.steps
    }

    /// Time since the run started, in logical seconds as of the last tick.
    ///
    /// Realtime logical time is wall time scaled by the clock rate, so this
    /// matches the wall clock only at rate 1. Offline it is the simulated time.
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }
}

impl fmt::Debug for SortScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortScheduler")
            .field("phase", &self.phase)
            .field("algorithm", &self.algorithm())
            .field("steps", &self.steps)
            .field("next_tick", &self.next_tick)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
