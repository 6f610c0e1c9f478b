use crate::sort::{ArrayTracer, Sorter};

/// Shifts larger elements right one position at a time, then drops the key
/// into the gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl Sorter for InsertionSort {
    fn name(&self) -> &'static str {
        "Insertion Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        for i in 1..data.len() {
            let key = data[i].clone();
            let mut gap = i;
            while gap > 0 && tracer.compare(&data[gap - 1], &key) {
                let shifted = data[gap - 1].clone();
                tracer.assign(data, gap, shifted);
                gap -= 1;
            }
            if gap != i {
                tracer.assign(data, gap, key);
            }
        }
    }
}
