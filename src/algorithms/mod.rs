//! Step-generating sorting procedures
//!
//! Each procedure owns its working array and suspends through a
//! [`StepSink`](crate::executor::StepSink) at every comparison and mutation.
//! Recursive procedures recurse through boxed futures so nested steps are
//! forwarded in exactly the order a recursive formulation visits them.

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::executor::{Procedure, StepEngine};
    use crate::step::{Step, Value};

    /// Drain a procedure and return every step it emitted.
    pub fn drain(procedure: Procedure, input: &[Value]) -> Vec<Step> {
        StepEngine::new(procedure, input).collect()
    }

    /// Final array after draining, or the input if nothing was emitted.
    pub fn final_array(procedure: Procedure, input: &[Value]) -> Vec<Value> {
        drain(procedure, input)
            .last()
            .map_or_else(|| input.to_vec(), |s| s.array.clone())
    }
}
