//! Rust Sort Stepper
//!
//! A step-by-step sorting engine with:
//! - Six classic sorts written as suspendable procedures that emit one
//!   inspectable step (comparison or mutation) per resumption
//! - A pausable tick scheduler (start / pause / resume / reset, adjustable speed)
//! - Dual execution modes: realtime (spin_sleep) and offline (stepping API)

pub mod algorithms;
pub mod catalog;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod executor;
pub mod observer;
pub mod rng;
pub mod scheduler;
pub mod step;


pub use catalog::{describe, describe_all, AlgorithmDescriptor, AlgorithmId};
pub use distribution::{generate, Distribution};
pub use engine::{Engine, EngineConfig, SchedulerMode};
pub use error::{Result, SortError};
pub use executor::{StepEngine, StepSink};
pub use observer::{RunSummary, StepEvent, StepObserver, StepRecorder};
pub use rng::DetRng;
pub use scheduler::{RunPhase, SortScheduler, TickOutcome};
pub use step::{Step, StepKind, Value};
