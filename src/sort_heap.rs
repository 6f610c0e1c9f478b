use crate::sort::{ArrayTracer, SortStep, Sorter};

/// In-place heap sort over a max-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl HeapSort {
    /// Sifts `root` down within `data[..len]`.
    fn heapify<T: PartialOrd + Clone>(
        data: &mut [T],
        len: usize,
        root: usize,
        tracer: &mut ArrayTracer<T>,
    ) {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < len && tracer.compare(&data[left], &data[largest]) {
            largest = left;
        }
        if right < len && tracer.compare(&data[right], &data[largest]) {
            largest = right;
        }

        if largest != root {
            tracer.swap(data, root, largest);
            tracer.record(SortStep::Heapify {
                root,
                largest,
                array: data.to_vec(),
            });
            Self::heapify(data, len, largest, tracer);
        }
    }
}

impl Sorter for HeapSort {
    fn name(&self) -> &'static str {
        "Heap Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        let n = data.len();
        for root in (0..n / 2).rev() {
            Self::heapify(data, n, root, tracer);
        }
        for end in (1..n).rev() {
            tracer.swap(data, 0, end);
            Self::heapify(data, end, 0, tracer);
        }
    }
}
