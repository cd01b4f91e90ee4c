//! Steps - immutable snapshots emitted at each suspension point
//!
//! A step is either an inspection (two indices being compared) or a mutation
//! (one or two indices just written). It always carries the full array.

use serde::Serialize;

/// Element type of the arrays being sorted.
pub type Value = i64;

/// Classification of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Compare,
    Mutate,
}

/// One unit of algorithm progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Full array contents at the suspension point (not a diff).
    pub array: Vec<Value>,
    /// Indices being compared; empty for mutation steps.
    pub comparing: Vec<usize>,
    /// Indices just written or swapped; empty for comparison steps.
    pub swapping: Vec<usize>,
}

impl Step {
    /// A comparison step over `(a, b)`.
    pub fn compare(array: &[Value], a: usize, b: usize) -> Self {
        Self {
            array: array.to_vec(),
            comparing: vec![a, b],
            swapping: Vec::new(),
        }
    }

    /// A mutation step over two swapped indices.
    pub fn swap(array: &[Value], a: usize, b: usize) -> Self {
        Self {
            array: array.to_vec(),
            comparing: Vec::new(),
            swapping: vec![a, b],
        }
    }

    /// A mutation step over a single written index.
    pub fn write(array: &[Value], idx: usize) -> Self {
        Self {
            array: array.to_vec(),
            comparing: Vec::new(),
            swapping: vec![idx],
        }
    }

    pub fn kind(&self) -> StepKind {
        if self.comparing.is_empty() {
            StepKind::Mutate
        } else {
            StepKind::Compare
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.kind() == StepKind::Compare
    }

    pub fn is_mutation(&self) -> bool {
        self.kind() == StepKind::Mutate
    }
}
