//! Algorithm Catalog
//!
//! A fixed, read-only registry mapping each algorithm identifier to its
//! display name, description and step-generating procedure.

use crate::algorithms::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, selection_sort,
};
use crate::error::{Result, SortError};
use crate::executor::{Procedure, StepEngine};
use crate::step::Value;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier of a registered algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmId {
    /// All identifiers in registration order.
    pub const ALL: [AlgorithmId; 6] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
        }
    }

    /// The registry entry for this identifier.
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        // CATALOG is laid out in the same order as the enum.
        &CATALOG[self as usize]
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SortError::UnknownAlgorithm { id: s.to_string() })
    }
}

/// Static description of one algorithm.
#[derive(Clone, Copy, Serialize)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub procedure: Procedure,
}

impl AlgorithmDescriptor {
    /// Bind this algorithm's procedure to a private copy of `input`.
    pub fn instantiate(&self, input: &[Value]) -> StepEngine {
        StepEngine::new(self.procedure, input)
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static CATALOG: [AlgorithmDescriptor; 6] = [
    AlgorithmDescriptor {
        id: AlgorithmId::Bubble,
        name: "Bubble Sort",
        description: "A simple sorting algorithm that repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
        procedure: bubble_sort,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Selection,
        name: "Selection Sort",
        description: "Divides the input list into a sorted and an unsorted region, and repeatedly selects the smallest element from the unsorted region to add to the sorted region.",
        procedure: selection_sort,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Insertion,
        name: "Insertion Sort",
        description: "Builds the final sorted array one item at a time, by repeatedly inserting a new element into the sorted portion of the array.",
        procedure: insertion_sort,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Merge,
        name: "Merge Sort",
        description: "A divide-and-conquer algorithm that recursively breaks down a list into smaller sublists until each sublist consists of a single element, then merges those sublists to produce a sorted list.",
        procedure: merge_sort,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Quick,
        name: "Quick Sort",
        description: "A highly efficient, comparison-based algorithm that uses a divide-and-conquer strategy to sort elements by partitioning the array around a pivot element.",
        procedure: quick_sort,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Heap,
        name: "Heap Sort",
        description: "A comparison-based sorting algorithm that uses a binary heap data structure to build a max-heap and repeatedly extracts the maximum element.",
        procedure: heap_sort,
    },
];

/// Look up an algorithm by identifier.
///
/// # Errors
/// [`SortError::UnknownAlgorithm`] if `id` is not registered.
pub fn describe(id: &str) -> Result<&'static AlgorithmDescriptor> {
    id.parse::<AlgorithmId>().map(AlgorithmId::descriptor)
}

/// Every registered algorithm, in registration order.
pub fn describe_all() -> &'static [AlgorithmDescriptor] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known() {
        let d = describe("quick").unwrap();
        assert_eq!(d.id, AlgorithmId::Quick);
        assert_eq!(d.name, "Quick Sort");
    }

    #[test]
    fn test_describe_unknown() {
        let err = describe("bogo").unwrap_err();
        assert_eq!(
            err,
            SortError::UnknownAlgorithm {
                id: "bogo".to_string()
            }
        );
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        assert!(describe("Bubble").is_err());
    }

    #[test]
    fn test_catalog_order_matches_ids() {
        for (d, id) in describe_all().iter().zip(AlgorithmId::ALL) {
            assert_eq!(d.id, id);
            assert_eq!(id.descriptor().id, id);
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn test_instantiate_runs_procedure() {
        let steps: Vec<_> = describe("bubble").unwrap().instantiate(&[2, 1]).collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].array, vec![1, 2]);
    }

    #[test]
    fn test_descriptor_serializes_without_procedure() {
        let json = serde_json::to_value(describe("heap").unwrap()).unwrap();
        assert_eq!(json["id"], "heap");
        assert_eq!(json["name"], "Heap Sort");
        assert!(json.get("procedure").is_none());
    }
}
