//! Single-procedure deterministic executor
//!
//! A sorting procedure is an `async` body that suspends at every comparison
//! and mutation by awaiting a [`StepSink`] future. [`StepEngine`] polls that
//! body exactly once per resumption, so each `resume()` runs the procedure up
//! to its next suspension point and hands back the step it parked there.
//!
//! Nothing inside a procedure performs I/O or waits on timers; the only
//! pending state it can ever return is "parked at a step".

use crate::step::{Step, Value};
use std::{
    cell::{Cell, RefCell},
    fmt,
    future::Future,
    iter::FusedIterator,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, RawWaker, RawWakerVTable, Waker},
};

/// A boxed, non-`Send` procedure body.
pub type LocalBoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Entry point of a step-generating procedure: takes ownership of the working
/// array and the sink it suspends through.
pub type Procedure = fn(Vec<Value>, StepSink) -> LocalBoxFuture<'static>;

/// Handle a procedure uses to publish a step and suspend.
#[derive(Clone, Default)]
pub struct StepSink {
    parked: Rc<RefCell<Option<Step>>>,
}

impl StepSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend on a comparison of `a` and `b`.
    pub fn compare(&self, array: &[Value], a: usize, b: usize) -> Suspend {
        self.suspend(Step::compare(array, a, b))
    }

    /// Suspend on a swap of `a` and `b` that has already been applied.
    pub fn swap(&self, array: &[Value], a: usize, b: usize) -> Suspend {
        self.suspend(Step::swap(array, a, b))
    }

    /// Suspend on a single write to `idx` that has already been applied.
    pub fn write(&self, array: &[Value], idx: usize) -> Suspend {
        self.suspend(Step::write(array, idx))
    }

    fn suspend(&self, step: Step) -> Suspend {
        Suspend {
            sink: self.clone(),
            step: Some(step),
        }
    }

    fn take(&self) -> Option<Step> {
        self.parked.borrow_mut().take()
    }
}

impl fmt::Debug for StepSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSink")
            .field("parked", &self.parked.borrow().is_some())
            .finish()
    }
}

/// Future returned by the [`StepSink`] methods.
///
/// First poll parks the step and returns `Pending`; the next poll completes.
#[must_use = "a step is only emitted when the suspension is awaited"]
pub struct Suspend {
    sink: StepSink,
    step: Option<Step>,
}

impl Future for Suspend {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.step.take() {
            Some(step) => {
                *this.sink.parked.borrow_mut() = Some(step);
                // Ready to continue as soon as the engine resumes us.
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

/// A suspendable run of one procedure over its own working array.
pub struct StepEngine {
    body: Option<LocalBoxFuture<'static>>,
    sink: StepSink,
    woken: Rc<Cell<bool>>,
    emitted: u64,
}

impl StepEngine {
    /// Bind `procedure` to a private copy of `input`. Nothing runs until the
    /// first `resume()`.
    pub fn new(procedure: Procedure, input: &[Value]) -> Self {
        let sink = StepSink::new();
        let body = procedure(input.to_vec(), sink.clone());
        Self {
            body: Some(body),
            sink,
            woken: Rc::new(Cell::new(false)),
            emitted: 0,
        }
    }

    /// Run the procedure to its next suspension point.
    /// Returns `None` once the procedure has finished; stays `None` afterwards.
    pub fn resume(&mut self) -> Option<Step> {
        let body = self.body.as_mut()?;

        self.woken.set(false);
        let waker = resume_waker(&self.woken);
        let mut cx = Context::from_waker(&waker);

        match body.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {
                self.body = None;
                None
            }
            Poll::Pending => match self.sink.take() {
                Some(step) if self.woken.get() => {
                    self.emitted += 1;
                    Some(step)
                }
                _ => {
                    // Parked on something that is not a step; it can never be
                    // resumed meaningfully.
                    tracing::warn!(
                        emitted = self.emitted,
                        "procedure suspended without emitting a step; treating as exhausted"
                    );
                    self.body = None;
                    None
                }
            },
        }
    }

    /// Whether the procedure has run to completion.
    pub fn is_exhausted(&self) -> bool {
        self.body.is_none()
    }

    /// Number of steps produced so far.
    pub fn steps_emitted(&self) -> u64 {
        self.emitted
    }
}

impl Iterator for StepEngine {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.resume()
    }
}

impl FusedIterator for StepEngine {}

impl fmt::Debug for StepEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEngine")
            .field("exhausted", &self.is_exhausted())
            .field("emitted", &self.emitted)
            .finish()
    }
}

// --- Waker implementation ---

/// A waker that only records that it was woken.
fn resume_waker(flag: &Rc<Cell<bool>>) -> Waker {
    /// Clone the waker data.
    unsafe fn clone_fn(data: *const ()) -> RawWaker {
        let flag = Rc::<Cell<bool>>::from_raw(data.cast::<Cell<bool>>());
        let cloned = flag.clone();
        std::mem::forget(flag);
        RawWaker::new(Rc::into_raw(cloned).cast::<()>(), &VTABLE)
    }

    /// Mark woken and consume the waker.
    unsafe fn wake_fn(data: *const ()) {
        wake_by_ref_fn(data);
        drop_fn(data);
    }

    /// Mark woken without consuming the waker.
    unsafe fn wake_by_ref_fn(data: *const ()) {
        let flag = Rc::<Cell<bool>>::from_raw(data.cast::<Cell<bool>>());
        flag.set(true);
        std::mem::forget(flag);
    }

    /// Drop the waker.
    unsafe fn drop_fn(data: *const ()) {
        drop(Rc::<Cell<bool>>::from_raw(data.cast::<Cell<bool>>()));
    }

    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone_fn, wake_fn, wake_by_ref_fn, drop_fn);

    let raw = RawWaker::new(Rc::into_raw(flag.clone()).cast::<()>(), &VTABLE);
    unsafe { Waker::from_raw(raw) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_steps(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
        Box::pin(async move {
            let mut arr = arr;
            sink.compare(&arr, 0, 1).await;
            arr.swap(0, 1);
            sink.swap(&arr, 0, 1).await;
        })
    }

    fn silent(_arr: Vec<Value>, _sink: StepSink) -> LocalBoxFuture<'static> {
        Box::pin(async {})
    }

    fn stalls(_arr: Vec<Value>, _sink: StepSink) -> LocalBoxFuture<'static> {
        Box::pin(std::future::pending::<()>())
    }

    #[test]
    fn test_resume_one_step_at_a_time() {
        let mut engine = StepEngine::new(two_steps, &[2, 1]);

        let s1 = engine.resume().unwrap();
        assert_eq!(s1.comparing, vec![0, 1]);
        assert_eq!(s1.array, vec![2, 1]);

        let s2 = engine.resume().unwrap();
        assert_eq!(s2.swapping, vec![0, 1]);
        assert_eq!(s2.array, vec![1, 2]);

        assert!(!engine.is_exhausted());
        assert!(engine.resume().is_none());
        assert!(engine.is_exhausted());
        assert_eq!(engine.steps_emitted(), 2);
    }

    #[test]
    fn test_stays_exhausted() {
        let mut engine = StepEngine::new(silent, &[]);
        assert!(engine.resume().is_none());
        assert!(engine.resume().is_none());
        assert_eq!(engine.steps_emitted(), 0);
    }

    #[test]
    fn test_input_is_copied() {
        let input = vec![2, 1];
        let steps: Vec<Step> = StepEngine::new(two_steps, &input).collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(input, vec![2, 1]);
    }

    #[test]
    fn test_foreign_pending_ends_run() {
        let mut engine = StepEngine::new(stalls, &[1]);
        assert!(engine.resume().is_none());
        assert!(engine.is_exhausted());
    }
}
