//! Coin change: largest-coin-first greedy against the minimum-coins DP.

use crate::error::{Error, Result};
use crate::metrics::{Recorder, Run};

/// One state transition of the greedy method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GreedyChangeStep {
    /// Denominations in descending order.
    Init { coins: Vec<usize>, amount: usize },
    /// `count` coins of value `coin` were taken.
    Take {
        coin: usize,
        count: usize,
        remaining: usize,
    },
}

/// One state transition of the DP method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DpChangeStep {
    /// `table[i]` is the fewest coins summing to `i`, `None` while unreachable.
    Init {
        table: Vec<Option<usize>>,
        amount: usize,
    },
    /// `amount` is now reachable with `count` coins, the last being `coin`.
    Update {
        amount: usize,
        coin: usize,
        count: usize,
    },
    Backtrack { coin: usize, remaining: usize },
}

/// Both answers for the same input. `None` means no exact change.
#[derive(Debug, Clone)]
pub struct ChangeComparison {
    pub greedy: Option<Vec<usize>>,
    pub greedy_run: Run<GreedyChangeStep>,
    pub dp: Option<Vec<usize>>,
    pub dp_run: Run<DpChangeStep>,
}

impl ChangeComparison {
    /// True when greedy found change using no more coins than the DP.
    pub fn greedy_is_optimal(&self) -> bool {
        match (&self.greedy, &self.dp) {
            (Some(g), Some(d)) => g.len() == d.len(),
            (None, None) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoinChange;

impl CoinChange {
    /// Takes as many of the largest denomination as fit, then the next.
    ///
    /// Optimal only for canonical coin systems such as `[1, 5, 10, 25]`.
    pub fn greedy(
        &self,
        coins: &[usize],
        amount: usize,
    ) -> Result<(Option<Vec<usize>>, Run<GreedyChangeStep>)> {
        validate(coins)?;
        tracing::debug!(coins = coins.len(), amount, "coin change, greedy");

        let mut rec = Recorder::new("Coin Change (Greedy)");
        let mut sorted = coins.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        rec.record(GreedyChangeStep::Init {
            coins: sorted.clone(),
            amount,
        });

        rec.start_clock();
        let mut taken = Vec::new();
        let mut remaining = amount;
        for &coin in &sorted {
            rec.count_operation();
            let count = remaining / coin;
            if count > 0 {
                taken.extend(std::iter::repeat(coin).take(count));
                remaining -= coin * count;
                rec.record(GreedyChangeStep::Take {
                    coin,
                    count,
                    remaining,
                });
            }
        }
        rec.stop_clock();

        let change = (remaining == 0).then_some(taken);
        Ok((change, rec.finish()))
    }

    /// Fewest coins by `table[i] = min(table[i - coin] + 1)`.
    ///
    /// Coins are tried in the given order; the first denomination reaching a
    /// new minimum wins.
    pub fn dp(
        &self,
        coins: &[usize],
        amount: usize,
    ) -> Result<(Option<Vec<usize>>, Run<DpChangeStep>)> {
        validate(coins)?;
        tracing::debug!(coins = coins.len(), amount, "coin change, dp");

        let mut rec = Recorder::new("Coin Change (DP)");
        let mut table: Vec<Option<usize>> = vec![None; amount + 1];
        table[0] = Some(0);
        let mut last_coin = vec![0usize; amount + 1];
        rec.note_space(2 * (amount as u64 + 1));
        rec.record(DpChangeStep::Init {
            table: table.clone(),
            amount,
        });

        rec.start_clock();
        for i in 1..=amount {
            for &coin in coins {
                rec.count_operation();
                if coin > i {
                    continue;
                }
                let Some(prev) = table[i - coin] else {
                    continue;
                };
                if table[i].map_or(true, |best| prev + 1 < best) {
                    table[i] = Some(prev + 1);
                    last_coin[i] = coin;
                    rec.record(DpChangeStep::Update {
                        amount: i,
                        coin,
                        count: prev + 1,
                    });
                }
            }
        }
        rec.stop_clock();

        if table[amount].is_none() {
            return Ok((None, rec.finish()));
        }

        let mut taken = Vec::new();
        let mut remaining = amount;
        while remaining > 0 {
            let coin = last_coin[remaining];
            taken.push(coin);
            remaining -= coin;
            rec.record(DpChangeStep::Backtrack { coin, remaining });
        }
        Ok((Some(taken), rec.finish()))
    }

    /// Runs both methods on the same input.
    pub fn compare_approaches(&self, coins: &[usize], amount: usize) -> Result<ChangeComparison> {
        let (greedy, greedy_run) = self.greedy(coins, amount)?;
        let (dp, dp_run) = self.dp(coins, amount)?;
        let comparison = ChangeComparison {
            greedy,
            greedy_run,
            dp,
            dp_run,
        };
        if !comparison.greedy_is_optimal() {
            tracing::debug!(
                amount,
                greedy = ?comparison.greedy.as_ref().map(Vec::len),
                dp = ?comparison.dp.as_ref().map(Vec::len),
                "greedy change is not optimal for this coin system"
            );
        }
        Ok(comparison)
    }
}

fn validate(coins: &[usize]) -> Result<()> {
    match coins.iter().position(|&c| c == 0) {
        Some(index) => Err(Error::ZeroCoin { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const US: [usize; 4] = [1, 5, 10, 25];

    #[test]
    fn test_canonical_system() {
        let (greedy, run) = CoinChange.greedy(&US, 63).unwrap();
        assert_eq!(greedy, Some(vec![25, 25, 10, 1, 1, 1]));
        assert_eq!(run.metrics().operations, 4);
        // init + take 25s, 10, 1s
        assert_eq!(run.len(), 4);

        let (dp, _) = CoinChange.dp(&US, 63).unwrap();
        assert_eq!(dp.map(|c| c.len()), Some(6));
    }

    #[test]
    fn test_non_canonical_system() {
        let cmp = CoinChange.compare_approaches(&[1, 3, 4], 6).unwrap();
        assert_eq!(cmp.greedy, Some(vec![4, 1, 1]));
        let mut dp = cmp.dp.clone().unwrap();
        dp.sort_unstable();
        assert_eq!(dp, vec![3, 3]);
        assert!(!cmp.greedy_is_optimal());
    }

    #[test]
    fn test_no_exact_change() {
        let (greedy, _) = CoinChange.greedy(&[5, 10], 3).unwrap();
        assert_eq!(greedy, None);
        let (dp, run) = CoinChange.dp(&[5, 10], 3).unwrap();
        assert_eq!(dp, None);
        assert!(!run
            .steps()
            .iter()
            .any(|s| matches!(s, DpChangeStep::Backtrack { .. })));
    }

    #[test]
    fn test_greedy_misses_where_dp_succeeds() {
        let cmp = CoinChange.compare_approaches(&[4, 3], 6).unwrap();
        assert_eq!(cmp.greedy, None);
        assert_eq!(cmp.dp, Some(vec![3, 3]));
    }

    #[test]
    fn test_zero_amount() {
        let (greedy, _) = CoinChange.greedy(&US, 0).unwrap();
        assert_eq!(greedy, Some(vec![]));
        let (dp, run) = CoinChange.dp(&US, 0).unwrap();
        assert_eq!(dp, Some(vec![]));
        assert_eq!(run.metrics().operations, 0);
    }

    #[test]
    fn test_dp_operations() {
        let (_, run) = CoinChange.dp(&US, 10).unwrap();
        assert_eq!(run.metrics().operations, 40);
        assert_eq!(run.metrics().space_used, 22);
    }

    #[test]
    fn test_zero_coin() {
        assert_eq!(
            CoinChange.greedy(&[1, 0], 5).unwrap_err(),
            Error::ZeroCoin { index: 1 }
        );
        assert!(CoinChange.dp(&[0], 5).is_err());
    }
}
