use crate::sort::{ArrayTracer, SortStep, Sorter};

/// Quick sort with Lomuto partitioning around the last element.
///
/// Elements equal to the pivot go to the low side. Recursion depth is
/// `O(n)` in the worst case (already sorted input).
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    fn sort_range<T: PartialOrd + Clone>(
        data: &mut [T],
        low: usize,
        high: usize,
        tracer: &mut ArrayTracer<T>,
    ) {
        if low < high {
            let pivot = Self::partition(data, low, high, tracer);
            if pivot > low {
                Self::sort_range(data, low, pivot - 1, tracer);
            }
            Self::sort_range(data, pivot + 1, high, tracer);
        }
    }

    /// Returns the final position of the pivot.
    fn partition<T: PartialOrd + Clone>(
        data: &mut [T],
        low: usize,
        high: usize,
        tracer: &mut ArrayTracer<T>,
    ) -> usize {
        let pivot = data[high].clone();
        let mut store = low;
        for j in low..high {
            if !tracer.compare(&data[j], &pivot) {
                tracer.swap(data, store, j);
                store += 1;
            }
        }
        tracer.swap(data, store, high);

        tracer.record(SortStep::Partition {
            low,
            high,
            array: data.to_vec(),
        });
        store
    }
}

impl Sorter for QuickSort {
    fn name(&self) -> &'static str {
        "Quick Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        if !data.is_empty() {
            let high = data.len() - 1;
            Self::sort_range(data, 0, high, tracer);
        }
    }
}
