use crate::sort::{ArrayTracer, SortStep, Sorter};

/// Top-down merge sort.
///
/// Recursion depth is `ceil(log2 n)`. Merging is stable: on equal elements
/// the left run wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    fn split<T: PartialOrd + Clone>(
        data: &mut [T],
        left: usize,
        right: usize,
        tracer: &mut ArrayTracer<T>,
    ) {
        if left < right {
            let mid = (left + right) / 2;
            Self::split(data, left, mid, tracer);
            Self::split(data, mid + 1, right, tracer);
            Self::merge(data, left, mid, right, tracer);
        }
    }

    fn merge<T: PartialOrd + Clone>(
        data: &mut [T],
        left: usize,
        mid: usize,
        right: usize,
        tracer: &mut ArrayTracer<T>,
    ) {
        let lhs = data[left..=mid].to_vec();
        let rhs = data[mid + 1..=right].to_vec();

        let (mut i, mut j, mut k) = (0, 0, left);
        while i < lhs.len() && j < rhs.len() {
            if !tracer.compare(&lhs[i], &rhs[j]) {
                tracer.assign(data, k, lhs[i].clone());
                i += 1;
            } else {
                tracer.assign(data, k, rhs[j].clone());
                j += 1;
            }
            k += 1;
        }
        for value in lhs[i..].iter().chain(&rhs[j..]) {
            tracer.assign(data, k, value.clone());
            k += 1;
        }

        tracer.record(SortStep::Merge {
            left,
            right,
            array: data.to_vec(),
        });
    }
}

impl Sorter for MergeSort {
    fn name(&self) -> &'static str {
        "Merge Sort"
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        if !data.is_empty() {
            let right = data.len() - 1;
            Self::split(data, 0, right, tracer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone)]
    struct Keyed {
        key: u8,
        tag: char,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    #[test]
    fn test_sorts() {
        let (sorted, _) = MergeSort.sort(&[38, 27, 43, 3, 9, 82, 10]);
        assert_eq!(sorted, vec![3, 9, 10, 27, 38, 43, 82]);
    }

    #[test]
    fn test_stable() {
        let input = [
            Keyed { key: 2, tag: 'a' },
            Keyed { key: 1, tag: 'b' },
            Keyed { key: 2, tag: 'c' },
            Keyed { key: 1, tag: 'd' },
        ];
        let (sorted, _) = MergeSort.sort(&input);
        let tags: String = sorted.iter().map(|k| k.tag).collect();
        assert_eq!(tags, "bdac");
    }

    #[test]
    fn test_merge_steps_cover_ranges() {
        let (_, run) = MergeSort.sort(&[4, 3, 2, 1]);
        let merges: Vec<_> = run
            .steps()
            .iter()
            .filter_map(|s| match s {
                SortStep::Merge { left, right, .. } => Some((*left, *right)),
                _ => None,
            })
            .collect();
        assert_eq!(merges, vec![(0, 1), (2, 3), (0, 3)]);
        // every merged element is written once per level
        assert_eq!(run.metrics().assignments, 8);
    }
}
