//! Heap sort

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// Build a max-heap, then repeatedly move the root behind the shrinking heap.
pub fn heap_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        let n = arr.len();

        for i in (0..n / 2).rev() {
            sift_down(&mut arr, n, i, &sink).await;
        }

        for end in (1..n).rev() {
            arr.swap(0, end);
            sink.swap(&arr, 0, end).await;
            sift_down(&mut arr, end, 0, &sink).await;
        }
    })
}

/// Restore the heap property for the subtree at `i` within the first `n`
/// elements.
///
/// Both child comparisons are always emitted, even when a child index lies
/// outside the heap; the bound only decides whether `largest` moves.
fn sift_down<'a>(arr: &'a mut [Value], n: usize, i: usize, sink: &'a StepSink) -> LocalBoxFuture<'a> {
    Box::pin(async move {
        let mut largest = i;
        let left = 2 * i + 1;
        let right = 2 * i + 2;

        sink.compare(arr, largest, left).await;
        if left < n && arr[left] > arr[largest] {
            largest = left;
        }

        sink.compare(arr, largest, right).await;
        if right < n && arr[right] > arr[largest] {
            largest = right;
        }

        if largest != i {
            arr.swap(i, largest);
            sink.swap(arr, i, largest).await;
            sift_down(arr, n, largest, sink).await;
        }
    })
}
