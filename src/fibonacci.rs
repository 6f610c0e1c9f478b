//! Fibonacci numbers by top-down memoization and bottom-up tabulation.

use crate::error::{Error, Result};
use crate::metrics::{Recorder, Run};
use ahash::AHashMap as HashMap;
use std::collections::BTreeMap;

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const MAX_N: u32 = 93;

/// One state transition of either Fibonacci method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FibonacciStep {
    /// Empty memo before the first call.
    Init { memo: BTreeMap<u32, u64> },
    /// `F(n)` was answered from the memo.
    MemoHit { n: u32, memo: BTreeMap<u32, u64> },
    /// `F(n)` was computed and stored.
    MemoCalc { n: u32, memo: BTreeMap<u32, u64> },
    /// Table with the base cases filled in.
    InitTable { table: Vec<u64> },
    /// Cell `i` of the table was filled.
    TableCalc { i: usize, table: Vec<u64> },
}

/// Result of [`Fibonacci::compare_methods`].
#[derive(Debug, Clone)]
pub struct FibonacciComparison {
    pub value: u64,
    pub memoized: Run<FibonacciStep>,
    pub tabulated: Run<FibonacciStep>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fibonacci;

impl Fibonacci {
    /// Top-down with a cache keyed by `n`.
    ///
    /// Recursion depth is `n`, at most [`MAX_N`].
    pub fn memoized(&self, n: u32) -> Result<(u64, Run<FibonacciStep>)> {
        check_range(n)?;
        tracing::debug!(n, "fibonacci, memoized");

        let mut rec = Recorder::new("Fibonacci (Memoization)");
        let mut memo = HashMap::default();
        rec.record(FibonacciStep::Init {
            memo: BTreeMap::new(),
        });

        rec.start_clock();
        let value = memo_fib(n, &mut memo, &mut rec);
        rec.stop_clock();

        rec.note_space(memo.len() as u64);
        Ok((value, rec.finish()))
    }

    /// Bottom-up over a table of `n + 1` cells.
    pub fn tabulated(&self, n: u32) -> Result<(u64, Run<FibonacciStep>)> {
        check_range(n)?;
        tracing::debug!(n, "fibonacci, tabulated");

        let mut rec = Recorder::new("Fibonacci (Tabulation)");
        let n = n as usize;
        let mut table = vec![0u64; n + 1];
        if n >= 1 {
            table[1] = 1;
        }
        rec.record(FibonacciStep::InitTable {
            table: table.clone(),
        });

        rec.start_clock();
        for i in 2..=n {
            rec.count_operation();
            table[i] = table[i - 1] + table[i - 2];
            rec.record(FibonacciStep::TableCalc {
                i,
                table: table.clone(),
            });
        }
        rec.stop_clock();

        rec.note_space(table.len() as u64);
        Ok((table[n], rec.finish()))
    }

    /// Runs both methods and fails if they disagree.
    pub fn compare_methods(&self, n: u32) -> Result<FibonacciComparison> {
        let (memo_value, memoized) = self.memoized(n)?;
        let (tab_value, tabulated) = self.tabulated(n)?;
        if memo_value != tab_value {
            return Err(Error::Inconsistent {
                check: "fibonacci methods",
                first: format!("memoized F({n}) = {memo_value}"),
                second: format!("tabulated F({n}) = {tab_value}"),
            });
        }
        Ok(FibonacciComparison {
            value: memo_value,
            memoized,
            tabulated,
        })
    }
}

fn check_range(n: u32) -> Result<()> {
    if n > MAX_N {
        return Err(Error::FibonacciOverflow { n, max: MAX_N });
    }
    Ok(())
}

fn memo_fib(n: u32, memo: &mut HashMap<u32, u64>, rec: &mut Recorder<FibonacciStep>) -> u64 {
    if n <= 1 {
        return n as u64;
    }

    if let Some(&value) = memo.get(&n) {
        rec.count_operation();
        rec.record(FibonacciStep::MemoHit {
            n,
            memo: snapshot(memo),
        });
        return value;
    }

    rec.count_operation();
    let value = memo_fib(n - 1, memo, rec) + memo_fib(n - 2, memo, rec);
    memo.insert(n, value);
    rec.record(FibonacciStep::MemoCalc {
        n,
        memo: snapshot(memo),
    });
    value
}

fn snapshot(memo: &HashMap<u32, u64>) -> BTreeMap<u32, u64> {
    memo.iter().map(|(&k, &v)| (k, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cases() {
        assert_eq!(Fibonacci.memoized(0).unwrap().0, 0);
        assert_eq!(Fibonacci.memoized(1).unwrap().0, 1);
        assert_eq!(Fibonacci.tabulated(0).unwrap().0, 0);
        assert_eq!(Fibonacci.tabulated(1).unwrap().0, 1);
    }

    #[test]
    fn test_f10() {
        assert_eq!(Fibonacci.memoized(10).unwrap().0, 55);
        assert_eq!(Fibonacci.tabulated(10).unwrap().0, 55);
    }

    #[test]
    fn test_largest_supported() {
        let cmp = Fibonacci.compare_methods(MAX_N).unwrap();
        assert_eq!(cmp.value, 12_200_160_415_121_876_738);
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(
            Fibonacci.tabulated(94).unwrap_err(),
            Error::FibonacciOverflow { n: 94, max: MAX_N }
        );
        assert!(Fibonacci.memoized(200).is_err());
    }

    #[test]
    fn test_memo_trace() {
        let (value, run) = Fibonacci.memoized(4).unwrap();
        assert_eq!(value, 3);
        let kinds: Vec<_> = run
            .steps()
            .iter()
            .map(|s| match s {
                FibonacciStep::Init { .. } => "init".to_string(),
                FibonacciStep::MemoHit { n, .. } => format!("hit{n}"),
                FibonacciStep::MemoCalc { n, .. } => format!("calc{n}"),
                _ => unreachable!(),
            })
            .collect();
        // F(4) -> F(3) -> F(2); F(3) then needs F(1); F(4) then hits F(2)
        assert_eq!(kinds, vec!["init", "calc2", "calc3", "hit2", "calc4"]);
        assert_eq!(run.metrics().operations, 4);
        assert_eq!(run.metrics().space_used, 3);
    }

    #[test]
    fn test_table_trace() {
        let (value, run) = Fibonacci.tabulated(5).unwrap();
        assert_eq!(value, 5);
        assert_eq!(run.len(), 5);
        assert_eq!(run.metrics().operations, 4);
        assert_eq!(run.metrics().space_used, 6);
        assert_eq!(
            run.last_step(),
            Some(&FibonacciStep::TableCalc {
                i: 5,
                table: vec![0, 1, 1, 2, 3, 5]
            })
        );
    }

    #[test]
    fn test_snapshots_are_independent() {
        let (_, run) = Fibonacci.memoized(5).unwrap();
        let sizes: Vec<_> = run
            .steps()
            .iter()
            .filter_map(|s| match s {
                FibonacciStep::MemoCalc { memo, .. } => Some(memo.len()),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![1, 2, 3, 4]);
    }
}
