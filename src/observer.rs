//! Observers - the presentation boundary
//!
//! Anything that renders bars or plays tones subscribes here. Observers see
//! published steps in order and never write back into a run.

use crate::catalog::AlgorithmId;
use crate::step::Step;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A step as published by the scheduler.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepEvent {
    pub algorithm: AlgorithmId,
    /// Step counter after this step (1-based).
    pub index: u64,
    /// Wall or logical seconds since the run started.
    pub elapsed_sec: f64,
    pub step: Step,
}

/// Published once when a run exhausts its procedure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub algorithm: AlgorithmId,
    pub name: &'static str,
    pub elements: usize,
    /// Every emitted step, comparisons and mutations alike.
    pub steps: u64,
    pub elapsed_sec: f64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finished sorting {} elements with {}. Number of comparisons: {}, Time: {:.3} seconds.",
            self.elements, self.name, self.steps, self.elapsed_sec
        )
    }
}

/// Receiver of published run progress.
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent);

    fn on_complete(&mut self, _summary: &RunSummary) {}

    fn on_reset(&mut self) {}
}

impl<T: StepObserver + ?Sized> StepObserver for Rc<RefCell<T>> {
    fn on_step(&mut self, event: &StepEvent) {
        self.borrow_mut().on_step(event);
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.borrow_mut().on_complete(summary);
    }

    fn on_reset(&mut self) {
        self.borrow_mut().on_reset();
    }
}

/// Observer that keeps everything it is shown.
#[derive(Debug, Default)]
pub struct StepRecorder {
    pub events: Vec<StepEvent>,
    pub summary: Option<RunSummary>,
    pub resets: usize,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, so the recorder can be read after subscribing it.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> + '_ {
        self.events.iter().map(|e| &e.step)
    }
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, event: &StepEvent) {
        self.events.push(event.clone());
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.summary = Some(summary.clone());
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            algorithm: AlgorithmId::Bubble,
            name: "Bubble Sort",
            elements: 3,
            steps: 5,
            elapsed_sec: 0.1,
        };
        assert_eq!(
            summary.to_string(),
            "Finished sorting 3 elements with Bubble Sort. Number of comparisons: 5, Time: 0.100 seconds."
        );
    }

    #[test]
    fn test_shared_recorder_forwards() {
        let rec = StepRecorder::shared();
        let mut handle = rec.clone();
        handle.on_step(&StepEvent {
            algorithm: AlgorithmId::Heap,
            index: 1,
            elapsed_sec: 0.0,
            step: Step::compare(&[1, 2], 0, 1),
        });
        handle.on_reset();
        assert_eq!(rec.borrow().events.len(), 1);
        assert_eq!(rec.borrow().resets, 1);
    }
}
