//! Longest common subsequence by tabulation and backtracking.

use crate::metrics::{Recorder, Run};

/// Which neighbour a mismatching cell took its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    Up,
    Left,
}

/// One state transition of the LCS solver.
///
/// `i` and `j` are 0-based character positions while filling and table
/// coordinates while backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LcsStep {
    Init {
        table: Vec<Vec<usize>>,
    },
    Match {
        ch: char,
        i: usize,
        j: usize,
        table: Vec<Vec<usize>>,
    },
    NoMatch {
        choice: Direction,
        i: usize,
        j: usize,
        table: Vec<Vec<usize>>,
    },
    /// `ch` joined the subsequence; `partial` is what has been collected so
    /// far, in backtracking (reverse) order.
    BacktrackMatch {
        ch: char,
        i: usize,
        j: usize,
        partial: String,
    },
    BacktrackUp {
        i: usize,
        j: usize,
        partial: String,
    },
    BacktrackLeft {
        i: usize,
        j: usize,
        partial: String,
    },
    Final {
        lcs: String,
        table: Vec<Vec<usize>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsResult {
    pub lcs: String,
    pub table: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lcs;

impl Lcs {
    pub const NAME: &'static str = "Longest Common Subsequence";

    /// Finds one longest common subsequence of `text1` and `text2`.
    ///
    /// Works on Unicode scalar values, not bytes.
    pub fn find(&self, text1: &str, text2: &str) -> (LcsResult, Run<LcsStep>) {
        let a: Vec<char> = text1.chars().collect();
        let b: Vec<char> = text2.chars().collect();
        let (m, n) = (a.len(), b.len());
        tracing::debug!(m, n, "lcs");

        let mut rec = Recorder::new(Self::NAME);
        let mut dp = vec![vec![0usize; n + 1]; m + 1];
        rec.note_space(((m + 1) * (n + 1)) as u64);
        rec.record(LcsStep::Init { table: dp.clone() });

        rec.start_clock();
        for i in 1..=m {
            for j in 1..=n {
                rec.count_operation();
                if a[i - 1] == b[j - 1] {
                    dp[i][j] = dp[i - 1][j - 1] + 1;
                    rec.record(LcsStep::Match {
                        ch: a[i - 1],
                        i: i - 1,
                        j: j - 1,
                        table: dp.clone(),
                    });
                } else {
                    let (up, left) = (dp[i - 1][j], dp[i][j - 1]);
                    dp[i][j] = up.max(left);
                    let choice = if left > up {
                        Direction::Left
                    } else {
                        Direction::Up
                    };
                    rec.record(LcsStep::NoMatch {
                        choice,
                        i: i - 1,
                        j: j - 1,
                        table: dp.clone(),
                    });
                }
            }
        }

        let mut reversed = String::new();
        let (mut i, mut j) = (m, n);
        while i > 0 && j > 0 {
            if a[i - 1] == b[j - 1] {
                reversed.push(a[i - 1]);
                i -= 1;
                j -= 1;
                rec.record(LcsStep::BacktrackMatch {
                    ch: a[i],
                    i,
                    j,
                    partial: reversed.clone(),
                });
            } else if dp[i - 1][j] >= dp[i][j - 1] {
                i -= 1;
                rec.record(LcsStep::BacktrackUp {
                    i,
                    j,
                    partial: reversed.clone(),
                });
            } else {
                j -= 1;
                rec.record(LcsStep::BacktrackLeft {
                    i,
                    j,
                    partial: reversed.clone(),
                });
            }
        }
        rec.stop_clock();

        let lcs: String = reversed.chars().rev().collect();
        rec.record(LcsStep::Final {
            lcs: lcs.clone(),
            table: dp.clone(),
        });
        (LcsResult { lcs, table: dp }, rec.finish())
    }
}

/// Lays the two strings out with a `|` under each character of `text1`
/// that takes part in `lcs`.
pub fn alignment(text1: &str, text2: &str, lcs: &str) -> String {
    let positions = subsequence_positions(text1, lcs);
    let match_line: String = text1
        .chars()
        .enumerate()
        .map(|(i, _)| if positions.contains(&i) { '|' } else { ' ' })
        .collect();
    [
        format!("String 1: {text1}"),
        format!("Match:    {match_line}"),
        format!("String 2: {text2}"),
        format!("LCS:      {lcs}"),
    ]
    .join("\n")
}

/// Greedy left-to-right positions of `sub` inside `text`.
fn subsequence_positions(text: &str, sub: &str) -> Vec<usize> {
    let mut wanted = sub.chars().peekable();
    let mut positions = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        if wanted.peek() == Some(&ch) {
            positions.push(i);
            wanted.next();
        }
    }
    positions
}

/// True when `sub` can be obtained from `text` by deleting characters.
pub fn is_subsequence(sub: &str, text: &str) -> bool {
    subsequence_positions(text, sub).len() == sub.chars().count()
}
