//! Insertion sort

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// Shift larger elements right one slot at a time, then drop the held key
/// into the gap. The final write is a single-index step with no preceding
/// comparison.
pub fn insertion_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        for i in 1..arr.len() {
            let key = arr[i];
            // `gap` is the slot the key would land in right now.
            let mut gap = i;
            while gap > 0 {
                sink.compare(&arr, gap - 1, gap).await;
                if arr[gap - 1] > key {
                    arr[gap] = arr[gap - 1];
                    sink.swap(&arr, gap - 1, gap).await;
                    gap -= 1;
                } else {
                    break;
                }
            }
            arr[gap] = key;
            sink.write(&arr, gap).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{drain, final_array};

    #[test]
    fn test_shift_then_write() {
        let steps = drain(insertion_sort, &[2, 1]);
        assert_eq!(steps.len(), 3);

        assert_eq!(steps[0].comparing, vec![0, 1]);
        // Shift leaves the old value duplicated until the key is written.
        assert_eq!(steps[1].swapping, vec![0, 1]);
        assert_eq!(steps[1].array, vec![2, 2]);
        assert_eq!(steps[2].swapping, vec![0]);
        assert_eq!(steps[2].array, vec![1, 2]);
    }

    #[test]
    fn test_in_place_key_still_written() {
        let steps = drain(insertion_sort, &[1, 2, 3]);
        // per i: one compare that breaks, one write
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].swapping, vec![1]);
        assert_eq!(steps[3].swapping, vec![2]);
    }

    #[test]
    fn test_repeated_values() {
        assert_eq!(final_array(insertion_sort, &[3, 1, 3, 1]), vec![1, 1, 3, 3]);
    }
}
