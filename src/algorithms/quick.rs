//! Quick sort (Lomuto partition)

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// Quick sort with the last element of each range as pivot.
pub fn quick_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        if arr.len() > 1 {
            let high = arr.len() - 1;
            sort_range(&mut arr, 0, high, &sink).await;
        }
    })
}

/// Sort the inclusive range `[low, high]`.
fn sort_range<'a>(
    arr: &'a mut [Value],
    low: usize,
    high: usize,
    sink: &'a StepSink,
) -> LocalBoxFuture<'a> {
    Box::pin(async move {
        if low < high {
            let pivot = arr[high];
            // Next slot for an element smaller than the pivot.
            let mut store = low;

            for j in low..high {
                sink.compare(arr, j, high).await;
                if arr[j] < pivot {
                    arr.swap(store, j);
                    sink.swap(arr, store, j).await;
                    store += 1;
                }
            }

            arr.swap(store, high);
            sink.swap(arr, store, high).await;

            if store > low {
                sort_range(arr, low, store - 1, sink).await;
            }
            sort_range(arr, store + 1, high, sink).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{drain, final_array};

    #[test]
    fn test_partition_steps() {
        let steps = drain(quick_sort, &[3, 1, 2]);

        // pivot 2: compare(0,2) no move, compare(1,2) swap(0,1), pivot swap(1,2)
        assert_eq!(steps[0].comparing, vec![0, 2]);
        assert_eq!(steps[1].comparing, vec![1, 2]);
        assert_eq!(steps[2].swapping, vec![0, 1]);
        assert_eq!(steps[2].array, vec![1, 3, 2]);
        assert_eq!(steps[3].swapping, vec![1, 2]);
        assert_eq!(steps[3].array, vec![1, 2, 3]);
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn test_pivot_swaps_with_itself() {
        // Everything smaller than the pivot: final swap is (high, high).
        let steps = drain(quick_sort, &[1, 2]);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].swapping, vec![0, 0]);
        assert_eq!(steps[2].swapping, vec![1, 1]);
    }

    #[test]
    fn test_pivot_smallest() {
        assert_eq!(final_array(quick_sort, &[3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn test_repeated_values() {
        assert_eq!(final_array(quick_sort, &[2, 2, 1, 2, 1]), vec![1, 1, 2, 2, 2]);
    }
}
