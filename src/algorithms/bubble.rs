//! Bubble sort

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// Adjacent compare-and-swap passes. Pass `i` stops before the `i` largest
/// elements already settled at the tail.
pub fn bubble_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        let n = arr.len();
        for i in 0..n.saturating_sub(1) {
            for j in 0..n - i - 1 {
                sink.compare(&arr, j, j + 1).await;
                if arr[j] > arr[j + 1] {
                    arr.swap(j, j + 1);
                    sink.swap(&arr, j, j + 1).await;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{drain, final_array};

    #[test]
    fn test_three_elements() {
        let steps = drain(bubble_sort, &[3, 1, 2]);
        assert_eq!(steps.len(), 5);

        assert_eq!(steps[0].comparing, vec![0, 1]);
        assert_eq!(steps[1].swapping, vec![0, 1]);
        assert_eq!(steps[1].array, vec![1, 3, 2]);
        assert_eq!(steps[2].comparing, vec![1, 2]);
        assert_eq!(steps[3].swapping, vec![1, 2]);
        assert_eq!(steps[3].array, vec![1, 2, 3]);
        // second pass still inspects the head pair
        assert_eq!(steps[4].comparing, vec![0, 1]);
        assert_eq!(steps[4].array, vec![1, 2, 3]);
    }

    #[test]
    fn test_sorted_input_only_compares() {
        let steps = drain(bubble_sort, &[1, 2, 3, 4]);
        // 3 + 2 + 1 comparisons, no swaps
        assert_eq!(steps.len(), 6);
        assert!(steps.iter().all(|s| s.swapping.is_empty()));
    }

    #[test]
    fn test_reversed_input() {
        assert_eq!(final_array(bubble_sort, &[5, 4, 3, 2, 1]), vec![1, 2, 3, 4, 5]);
    }
}
