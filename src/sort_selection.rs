use crate::sort::{ArrayTracer, Sorter};

/// Repeatedly moves the minimum of the unsorted suffix to the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl Sorter for SelectionSort {
    fn name(&self) -> &'static str {
        "Selection Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        let n = data.len();
        for boundary in 0..n {
            let mut min_idx = boundary;
            for j in boundary + 1..n {
                if tracer.compare(&data[min_idx], &data[j]) {
                    min_idx = j;
                }
            }
            // no self-swap
            if min_idx != boundary {
                tracer.swap(data, boundary, min_idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortStep;

    #[test]
    fn test_sorts() {
        let (sorted, _) = SelectionSort.sort(&[64, 25, 12, 22, 11]);
        assert_eq!(sorted, vec![11, 12, 22, 25, 64]);
    }

    #[test]
    fn test_no_self_swap() {
        let (_, run) = SelectionSort.sort(&[1, 2, 3]);
        assert_eq!(run.metrics().swaps, 0);
        assert_eq!(run.metrics().comparisons, 3);
        assert!(run
            .steps()
            .iter()
            .all(|s| !matches!(s, SortStep::Swap { .. })));
    }

    #[test]
    fn test_swap_records_boundary_and_min() {
        let (_, run) = SelectionSort.sort(&[2, 1]);
        assert_eq!(
            run.steps()[1],
            SortStep::Swap {
                i: 0,
                j: 1,
                array: vec![1, 2]
            }
        );
    }
}
