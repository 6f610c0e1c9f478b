//! 0/1 knapsack by tabulation and the fractional relaxation by greedy ratio.

use crate::error::{ensure_same_len, Error, Result};
use crate::metrics::{Recorder, Run};

/// Label attached to each filled cell of the 0/1 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Decision {
    /// The item fits and including it strictly beats leaving it out.
    Include,
    /// The item fits but including it does not improve the value.
    Exclude,
    /// The item is heavier than the capacity of the cell.
    TooHeavy,
}

/// One state transition of the 0/1 solver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KnapsackStep {
    Init {
        table: Vec<Vec<u64>>,
    },
    /// Cell `(item, capacity)` was filled. `include_value` is 0 for
    /// [`Decision::TooHeavy`].
    Fill {
        item: usize,
        capacity: usize,
        decision: Decision,
        include_value: u64,
        exclude_value: u64,
        table: Vec<Vec<u64>>,
    },
    /// Backtracking decided on item `item` (0-based).
    Backtrack { item: usize, selected: bool },
}

/// One state transition of the fractional solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FractionalStep {
    /// Items ordered by descending value/weight ratio.
    Init { items: Vec<RatedItem> },
    Take {
        item: usize,
        fraction: f64,
        value: f64,
        remaining: usize,
    },
    TakeFraction {
        item: usize,
        fraction: f64,
        value: f64,
        remaining: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RatedItem {
    pub index: usize,
    pub ratio: f64,
    pub value: u64,
    pub weight: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackSolution {
    pub value: u64,
    /// Selected item indices in input order.
    pub items: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FractionalSolution {
    pub value: f64,
    /// `(index, fraction)` pairs in the order they were taken.
    pub items: Vec<(usize, f64)>,
}

/// Both solutions for the same input.
#[derive(Debug, Clone)]
pub struct KnapsackComparison {
    pub zero_one: KnapsackSolution,
    pub zero_one_run: Run<KnapsackStep>,
    pub fractional: FractionalSolution,
    pub fractional_run: Run<FractionalStep>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Knapsack;

impl Knapsack {
    /// Solves 0/1 knapsack over an `(n + 1) x (capacity + 1)` table.
    ///
    /// Selected items are recovered from value changes between rows, not
    /// from the recorded decision labels.
    pub fn solve(
        &self,
        weights: &[usize],
        values: &[u64],
        capacity: usize,
    ) -> Result<(KnapsackSolution, Run<KnapsackStep>)> {
        ensure_same_len("weights", weights.len(), "values", values.len())?;
        let n = weights.len();
        tracing::debug!(items = n, capacity, "knapsack 0/1");

        let mut rec = Recorder::new("0/1 Knapsack");
        let mut dp = vec![vec![0u64; capacity + 1]; n + 1];
        rec.note_space(((n + 1) * (capacity + 1)) as u64);
        rec.record(KnapsackStep::Init { table: dp.clone() });

        rec.start_clock();
        for i in 1..=n {
            let (weight, value) = (weights[i - 1], values[i - 1]);
            for w in 0..=capacity {
                rec.count_operation();
                let exclude_value = dp[i - 1][w];
                let (decision, include_value) = if weight <= w {
                    let include_value = value + dp[i - 1][w - weight];
                    dp[i][w] = include_value.max(exclude_value);
                    let decision = if include_value > exclude_value {
                        Decision::Include
                    } else {
                        Decision::Exclude
                    };
                    (decision, include_value)
                } else {
                    dp[i][w] = exclude_value;
                    (Decision::TooHeavy, 0)
                };
                rec.record(KnapsackStep::Fill {
                    item: i,
                    capacity: w,
                    decision,
                    include_value,
                    exclude_value,
                    table: dp.clone(),
                });
            }
        }
        rec.stop_clock();

        let mut items = Vec::new();
        let mut w = capacity;
        for i in (1..=n).rev() {
            let selected = dp[i][w] != dp[i - 1][w];
            if selected {
                items.push(i - 1);
                w -= weights[i - 1];
            }
            rec.record(KnapsackStep::Backtrack {
                item: i - 1,
                selected,
            });
        }
        items.reverse();

        let solution = KnapsackSolution {
            value: dp[n][capacity],
            items,
        };
        Ok((solution, rec.finish()))
    }

    /// Greedy by value/weight ratio, allowing one fractional item.
    ///
    /// Ties in ratio keep input order.
    pub fn solve_fractional(
        &self,
        weights: &[usize],
        values: &[u64],
        capacity: usize,
    ) -> Result<(FractionalSolution, Run<FractionalStep>)> {
        ensure_same_len("weights", weights.len(), "values", values.len())?;
        if let Some(index) = weights.iter().position(|&w| w == 0) {
            return Err(Error::ZeroWeight { index });
        }
        let n = weights.len();
        tracing::debug!(items = n, capacity, "knapsack fractional");

        let mut rec = Recorder::new("Fractional Knapsack");
        let mut items: Vec<RatedItem> = weights
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (&weight, &value))| RatedItem {
                index,
                ratio: value as f64 / weight as f64,
                value,
                weight,
            })
            .collect();
        items.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        rec.record(FractionalStep::Init {
            items: items.clone(),
        });

        rec.start_clock();
        let mut total = 0.0;
        let mut taken = Vec::new();
        let mut remaining = capacity;
        for item in &items {
            rec.count_operation();
            if remaining >= item.weight {
                taken.push((item.index, 1.0));
                total += item.value as f64;
                remaining -= item.weight;
                rec.record(FractionalStep::Take {
                    item: item.index,
                    fraction: 1.0,
                    value: item.value as f64,
                    remaining,
                });
            } else {
                if remaining > 0 {
                    let fraction = remaining as f64 / item.weight as f64;
                    let value = item.value as f64 * fraction;
                    taken.push((item.index, fraction));
                    total += value;
                    remaining = 0;
                    rec.record(FractionalStep::TakeFraction {
                        item: item.index,
                        fraction,
                        value,
                        remaining,
                    });
                }
                break;
            }
        }
        rec.stop_clock();
        rec.note_space(n as u64);

        let solution = FractionalSolution {
            value: total,
            items: taken,
        };
        Ok((solution, rec.finish()))
    }

    /// Runs both solvers on the same input.
    pub fn compare_methods(
        &self,
        weights: &[usize],
        values: &[u64],
        capacity: usize,
    ) -> Result<KnapsackComparison> {
        let (zero_one, zero_one_run) = self.solve(weights, values, capacity)?;
        let (fractional, fractional_run) = self.solve_fractional(weights, values, capacity)?;
        Ok(KnapsackComparison {
            zero_one,
            zero_one_run,
            fractional,
            fractional_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: [usize; 4] = [1, 3, 4, 5];
    const VALUES: [u64; 4] = [1, 4, 5, 7];

    #[test]
    fn test_zero_one_optimum() {
        let (solution, run) = Knapsack.solve(&WEIGHTS, &VALUES, 7).unwrap();
        assert_eq!(solution.value, 9);
        assert_eq!(solution.items, vec![1, 2]);
        assert_eq!(run.metrics().operations, 4 * 8);
        assert_eq!(run.metrics().space_used, 5 * 8);
        // init + one fill per cell + one backtrack per item
        assert_eq!(run.len(), 1 + 32 + 4);
    }

    #[test]
    fn test_tie_labelled_exclude() {
        // item 1 alone (value 2) ties with item 0 alone (value 2) at capacity 1
        let (_, run) = Knapsack.solve(&[1, 1], &[2, 2], 1).unwrap();
        let last_fill = run
            .steps()
            .iter()
            .rev()
            .find(|s| matches!(s, KnapsackStep::Fill { .. }))
            .cloned();
        match last_fill {
            Some(KnapsackStep::Fill {
                decision,
                include_value,
                exclude_value,
                ..
            }) => {
                assert_eq!(decision, Decision::Exclude);
                assert_eq!(include_value, exclude_value);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_too_heavy() {
        let (solution, run) = Knapsack.solve(&[5], &[10], 3).unwrap();
        assert_eq!(solution.value, 0);
        assert!(solution.items.is_empty());
        assert!(run.steps().iter().any(|s| matches!(
            s,
            KnapsackStep::Fill {
                decision: Decision::TooHeavy,
                ..
            }
        )));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            Knapsack.solve(&[1, 2], &[3], 4),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_fractional_dominates() {
        let cmp = Knapsack.compare_methods(&WEIGHTS, &VALUES, 7).unwrap();
        assert!(cmp.fractional.value >= cmp.zero_one.value as f64);
        assert_eq!(cmp.fractional_run.metrics().space_used, 4);
    }

    #[test]
    fn test_fractional_takes_slice() {
        let (solution, run) = Knapsack
            .solve_fractional(&[10, 20, 30], &[60, 100, 120], 50)
            .unwrap();
        assert!((solution.value - 240.0).abs() < 1e-9);
        assert_eq!(solution.items[0], (0, 1.0));
        assert_eq!(solution.items[1], (1, 1.0));
        assert_eq!(solution.items[2].0, 2);
        assert!((solution.items[2].1 - 2.0 / 3.0).abs() < 1e-9);
        assert!(matches!(
            run.last_step(),
            Some(FractionalStep::TakeFraction { remaining: 0, .. })
        ));
    }

    #[test]
    fn test_fractional_zero_weight() {
        assert_eq!(
            Knapsack.solve_fractional(&[1, 0], &[1, 1], 3).unwrap_err(),
            Error::ZeroWeight { index: 1 }
        );
    }
}
