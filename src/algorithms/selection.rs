//! Selection sort

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// For each slot `i`, scan the unsorted tail for the minimum and swap it in.
/// Updating the running minimum is not a step; only the scan comparisons and
/// the final swap (when one is needed) are.
pub fn selection_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        let n = arr.len();
        for i in 0..n.saturating_sub(1) {
            let mut min_idx = i;
            for j in i + 1..n {
                sink.compare(&arr, min_idx, j).await;
                if arr[j] < arr[min_idx] {
                    min_idx = j;
                }
            }
            if min_idx != i {
                arr.swap(i, min_idx);
                sink.swap(&arr, i, min_idx).await;
            }
        }
    })
}
