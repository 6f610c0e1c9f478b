use crate::sort::{ArrayTracer, Sorter};

/// Adjacent-exchange sort with early exit.
///
/// Stops after the first inner pass that performs no swap, so an already
/// sorted input costs one pass of `n - 1` comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl Sorter for BubbleSort {
    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        let n = data.len();
        for pass in 0..n {
            let mut swapped = false;
            for j in 0..n - pass - 1 {
                if tracer.compare(&data[j], &data[j + 1]) {
                    tracer.swap(data, j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortStep;

    #[test]
    fn test_sorted_input_single_pass() {
        let (sorted, run) = BubbleSort.sort(&[1, 2, 3, 4, 5]);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(run.metrics().comparisons, 4);
        assert_eq!(run.metrics().swaps, 0);
        assert_eq!(run.len(), 2);
    }

    #[test]
    fn test_reverse_input() {
        let (sorted, run) = BubbleSort.sort(&[3, 2, 1]);
        assert_eq!(sorted, vec![1, 2, 3]);
        assert_eq!(run.metrics().swaps, 3);
        // passes: 2 + 1 comparisons, the last pass has no inner iterations
        assert_eq!(run.metrics().comparisons, 3);
        assert_eq!(
            run.steps()[1],
            SortStep::Swap {
                i: 0,
                j: 1,
                array: vec![2, 3, 1]
            }
        );
    }

    #[test]
    fn test_equal_elements_not_swapped() {
        let (_, run) = BubbleSort.sort(&[7, 7, 7]);
        assert_eq!(run.metrics().swaps, 0);
    }

    #[test]
    fn test_single_element() {
        let (sorted, run) = BubbleSort.sort(&['x']);
        assert_eq!(sorted, vec!['x']);
        assert_eq!(run.metrics().comparisons, 0);
    }
}
