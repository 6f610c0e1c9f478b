use crate::metrics::{Recorder, Run};

/// One state transition of a binary search.
///
/// Bounds are signed so an exhausted range (`right == left - 1`, possibly
/// `-1`) is representable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SearchStep<T> {
    /// Entry to a recursive call over `left..=right`.
    Search { left: isize, right: isize, array: Vec<T> },
    /// The target sits at `index`.
    Found { index: usize, array: Vec<T> },
    /// Continuing in the left half `left..=right`.
    Left { left: isize, right: isize, array: Vec<T> },
    /// Continuing in the right half `left..=right`.
    Right { left: isize, right: isize, array: Vec<T> },
}

impl<T> SearchStep<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchStep::Search { .. } => "search",
            SearchStep::Found { .. } => "found",
            SearchStep::Left { .. } => "left",
            SearchStep::Right { .. } => "right",
        }
    }
}

/// Recursive binary search over an ascending slice.
///
/// The slice is not checked for order. Recursion depth is bounded by
/// `ceil(log2(n + 1)) + 1` frames, the last of which only records its empty
/// range.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl BinarySearch {
    pub const NAME: &'static str = "Binary Search";

    /// Returns the index of `target` in `array`, or `None` on a miss.
    pub fn search<T: PartialOrd + Clone>(
        &self,
        array: &[T],
        target: &T,
    ) -> (Option<usize>, Run<SearchStep<T>>) {
        tracing::debug!(len = array.len(), "binary search");

        let mut rec = Recorder::new(Self::NAME);
        rec.start_clock();
        let found = Self::search_range(array, target, 0, array.len() as isize - 1, &mut rec);
        rec.stop_clock();
        (found, rec.finish())
    }

    fn search_range<T: PartialOrd + Clone>(
        array: &[T],
        target: &T,
        left: isize,
        right: isize,
        rec: &mut Recorder<SearchStep<T>>,
    ) -> Option<usize> {
        rec.record(SearchStep::Search {
            left,
            right,
            array: array.to_vec(),
        });
        if left > right {
            return None;
        }

        // both bounds are non-negative here
        let mid = ((left + right) / 2) as usize;
        rec.count_comparison();
        if array[mid] == *target {
            rec.record(SearchStep::Found {
                index: mid,
                array: array.to_vec(),
            });
            Some(mid)
        } else if array[mid] > *target {
            let right = mid as isize - 1;
            rec.record(SearchStep::Left {
                left,
                right,
                array: array.to_vec(),
            });
            Self::search_range(array, target, left, right, rec)
        } else {
            let left = mid as isize + 1;
            rec.record(SearchStep::Right {
                left,
                right,
                array: array.to_vec(),
            });
            Self::search_range(array, target, left, right, rec)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_first_probe() {
        let (found, run) = BinarySearch.search(&[1, 3, 5], &3);
        assert_eq!(found, Some(1));
        let kinds: Vec<_> = run.steps().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["search", "found"]);
        assert_eq!(run.metrics().comparisons, 1);
    }

    #[test]
    fn test_found_right_half() {
        let (found, run) = BinarySearch.search(&[1, 3, 5, 7, 9], &9);
        assert_eq!(found, Some(4));
        let kinds: Vec<_> = run.steps().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["search", "right", "search", "right", "search", "found"]);
        assert_eq!(run.metrics().comparisons, 3);
    }

    #[test]
    fn test_miss_records_terminal_call() {
        let (found, run) = BinarySearch.search(&[1, 3, 5], &0);
        assert_eq!(found, None);
        assert_eq!(
            run.last_step(),
            Some(&SearchStep::Search {
                left: 0,
                right: -1,
                array: vec![1, 3, 5]
            })
        );
        // the terminal call does not compare
        assert_eq!(run.metrics().comparisons, 2);
    }

    #[test]
    fn test_empty_array() {
        let (found, run) = BinarySearch.search::<i32>(&[], &4);
        assert_eq!(found, None);
        assert_eq!(run.len(), 1);
        assert_eq!(run.metrics().comparisons, 0);
    }
}
