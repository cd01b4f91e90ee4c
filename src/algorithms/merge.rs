//! Merge sort

use crate::executor::{LocalBoxFuture, StepSink};
use crate::step::Value;

/// Top-down merge sort over the whole array.
pub fn merge_sort(arr: Vec<Value>, sink: StepSink) -> LocalBoxFuture<'static> {
    Box::pin(async move {
        let mut arr = arr;
        if arr.len() > 1 {
            let right = arr.len() - 1;
            sort_range(&mut arr, 0, right, &sink).await;
        }
    })
}

/// Sort the inclusive range `[left, right]`.
fn sort_range<'a>(
    arr: &'a mut [Value],
    left: usize,
    right: usize,
    sink: &'a StepSink,
) -> LocalBoxFuture<'a> {
    Box::pin(async move {
        if left < right {
            let mid = (left + right) / 2;
            sort_range(arr, left, mid, sink).await;
            sort_range(arr, mid + 1, right, sink).await;
            merge(arr, left, mid, right, sink).await;
        }
    })
}

/// Merge the sorted halves `[left, mid]` and `[mid + 1, right]`.
///
/// Heads are compared in array coordinates; once either half runs out the
/// rest is drained with writes only.
async fn merge(arr: &mut [Value], left: usize, mid: usize, right: usize, sink: &StepSink) {
    let lo = arr[left..=mid].to_vec();
    let hi = arr[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lo.len() && j < hi.len() {
        sink.compare(arr, left + i, mid + 1 + j).await;
        if lo[i] <= hi[j] {
            arr[k] = lo[i];
            i += 1;
        } else {
            arr[k] = hi[j];
            j += 1;
        }
        sink.write(arr, k).await;
        k += 1;
    }

    for &v in lo[i..].iter().chain(&hi[j..]) {
        arr[k] = v;
        sink.write(arr, k).await;
        k += 1;
    }
}
