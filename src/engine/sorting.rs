// Sorting engines
//
// Each engine mutates the working sequence in place and yields to the step scheduler
// after every visible unit of work. The stop condition is checked on both sides of
// each step boundary; on a stop the engine returns `Aborted` without rendering again.
// An aborted sequence is partially sorted but always a permutation of the input.

use super::StepContext;
use crate::models::RunOutcome;
use crate::render::StatusColor;
use std::future::Future;
use std::pin::Pin;

/// Boxed future used by the recursive engines
type StepFuture<'a> = Pin<Box<dyn Future<Output = RunOutcome> + Send + 'a>>;

/// Adjacent-pair passes; the largest remaining value bubbles to the end of each pass.
pub async fn bubble_sort(values: &mut [f64], ctx: &StepContext) -> RunOutcome {
    let n = values.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if ctx.is_stopped() {
                return RunOutcome::Aborted;
            }

            ctx.render(values, &[j, j + 1], &[]);
            ctx.step().await;
            if ctx.is_stopped() {
                return RunOutcome::Aborted;
            }

            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                ctx.metrics().record_swap();
                ctx.set_status(
                    &format!("Swapped {} and {}", values[j], values[j + 1]),
                    StatusColor::Orange,
                );
            } else {
                ctx.set_status(
                    &format!("Compared {} and {}", values[j], values[j + 1]),
                    StatusColor::Gray,
                );
            }
        }
    }
    RunOutcome::Completed
}

/// Shift larger predecessors right one at a time, then drop the key into the gap.
pub async fn insertion_sort(values: &mut [f64], ctx: &StepContext) -> RunOutcome {
    for i in 1..values.len() {
        if ctx.is_stopped() {
            return RunOutcome::Aborted;
        }

        let key = values[i];
        // Slot j is always the gap the key will drop into
        let mut j = i;

        while j > 0 && values[j - 1] > key {
            if ctx.is_stopped() {
                return RunOutcome::Aborted;
            }

            values[j] = values[j - 1];
            ctx.metrics().record_write();
            ctx.render(values, &[j - 1, j], &[]);
            ctx.set_status(
                &format!("Moving {} forward", values[j - 1]),
                StatusColor::Orange,
            );
            ctx.step().await;
            j -= 1;
            if ctx.is_stopped() {
                values[j] = key;
                return RunOutcome::Aborted;
            }
        }

        values[j] = key;
    }
    RunOutcome::Completed
}

/// Top-down merge sort, left half strictly before right half.
pub async fn merge_sort(values: &mut [f64], ctx: &StepContext) -> RunOutcome {
    if values.len() < 2 {
        return RunOutcome::Completed;
    }
    let right = values.len() - 1;
    merge_sort_range(values, 0, right, ctx).await
}

fn merge_sort_range<'a>(
    values: &'a mut [f64],
    left: usize,
    right: usize,
    ctx: &'a StepContext,
) -> StepFuture<'a> {
    Box::pin(async move {
        if left >= right {
            return RunOutcome::Completed;
        }
        if ctx.is_stopped() {
            return RunOutcome::Aborted;
        }

        let mid = left + (right - left) / 2;
        if merge_sort_range(&mut *values, left, mid, ctx).await == RunOutcome::Aborted {
            return RunOutcome::Aborted;
        }
        if merge_sort_range(&mut *values, mid + 1, right, ctx).await == RunOutcome::Aborted {
            return RunOutcome::Aborted;
        }
        if merge(values, left, mid, right, ctx).await == RunOutcome::Aborted
            || ctx.is_stopped()
        {
            return RunOutcome::Aborted;
        }

        ctx.render(values, &[], &[]);
        RunOutcome::Completed
    })
}

/// Merge `[left, mid]` and `[mid + 1, right]`, one visible write per step.
///
/// Both halves are copied before writing. Ties take the left element, so the merge
/// is stable. Whatever remains in either half once the other runs out, or once the
/// run is stopped, is copied back without further steps.
async fn merge(
    values: &mut [f64],
    left: usize,
    mid: usize,
    right: usize,
    ctx: &StepContext,
) -> RunOutcome {
    let lower = values[left..=mid].to_vec();
    let upper = values[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);
    let mut outcome = RunOutcome::Completed;

    while i < lower.len() && j < upper.len() {
        if ctx.is_stopped() {
            outcome = RunOutcome::Aborted;
            break;
        }

        if lower[i] <= upper[j] {
            values[k] = lower[i];
            i += 1;
        } else {
            values[k] = upper[j];
            j += 1;
        }
        ctx.metrics().record_write();
        ctx.render(values, &[k], &[]);
        k += 1;
        ctx.step().await;
    }

    for &value in lower[i..].iter().chain(&upper[j..]) {
        values[k] = value;
        k += 1;
    }

    outcome
}

/// Quick sort with Lomuto partitioning around the last element.
pub async fn quick_sort(values: &mut [f64], ctx: &StepContext) -> RunOutcome {
    if values.len() < 2 {
        return RunOutcome::Completed;
    }
    let high = values.len() - 1;
    quick_sort_range(values, 0, high, ctx).await
}

fn quick_sort_range<'a>(
    values: &'a mut [f64],
    low: usize,
    high: usize,
    ctx: &'a StepContext,
) -> StepFuture<'a> {
    Box::pin(async move {
        if low >= high {
            return RunOutcome::Completed;
        }
        if ctx.is_stopped() {
            return RunOutcome::Aborted;
        }

        let Some(pivot) = partition(&mut *values, low, high, ctx).await else {
            return RunOutcome::Aborted;
        };

        // The pivot is already in place and excluded from both halves
        if pivot > low
            && quick_sort_range(&mut *values, low, pivot - 1, ctx).await == RunOutcome::Aborted
        {
            return RunOutcome::Aborted;
        }
        quick_sort_range(values, pivot + 1, high, ctx).await
    })
}

/// Lomuto partition of `[low, high]`; returns the pivot's final index, or `None`
/// when stopped.
async fn partition(
    values: &mut [f64],
    low: usize,
    high: usize,
    ctx: &StepContext,
) -> Option<usize> {
    let pivot = values[high];
    let mut boundary = low;

    for j in low..high {
        if ctx.is_stopped() {
            return None;
        }

        ctx.render(values, &[j, high], &[]);
        ctx.step().await;
        if ctx.is_stopped() {
            return None;
        }

        if values[j] < pivot {
            values.swap(boundary, j);
            ctx.metrics().record_swap();
            boundary += 1;
        }
    }

    values.swap(boundary, high);
    Some(boundary)
}
