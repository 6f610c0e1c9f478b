//! Activity selection: the earliest-finish greedy and a DP cross-check.

use crate::error::{ensure_same_len, Error, Result};
use crate::metrics::{Recorder, Run};

/// An activity with its position in the caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Activity {
    pub index: usize,
    pub start: i64,
    pub end: i64,
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{} ({}-{})", self.index, self.start, self.end)
    }
}

/// One state transition of either selection method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ActivityStep {
    /// Activities sorted by end time.
    Init { activities: Vec<Activity> },
    Select {
        activity: Activity,
        selected: Vec<usize>,
        last_end: i64,
    },
    /// Overlaps the last selected activity.
    Skip {
        activity: Activity,
        selected: Vec<usize>,
        last_end: i64,
    },
    /// DP: taking `activity` after the first `compatible` sorted activities
    /// beats skipping it.
    DpInclude {
        activity: Activity,
        compatible: usize,
        table: Vec<usize>,
    },
    DpExclude { activity: Activity, table: Vec<usize> },
    Final { selected: Vec<usize> },
}

/// Both selections for the same input.
#[derive(Debug, Clone)]
pub struct ActivityComparison {
    pub greedy: Vec<usize>,
    pub greedy_run: Run<ActivityStep>,
    pub dp: Vec<usize>,
    pub dp_run: Run<ActivityStep>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActivitySelection;

impl ActivitySelection {
    /// Earliest-finish-first greedy. Returns selected input indices.
    pub fn select(
        &self,
        starts: &[i64],
        ends: &[i64],
    ) -> Result<(Vec<usize>, Run<ActivityStep>)> {
        let activities = sorted_by_end(starts, ends)?;
        tracing::debug!(activities = activities.len(), "activity selection, greedy");

        let mut rec = Recorder::new("Activity Selection (Greedy)");
        let Some(first) = activities.first().copied() else {
            return Ok((Vec::new(), rec.finish()));
        };
        rec.record(ActivityStep::Init {
            activities: activities.clone(),
        });

        rec.start_clock();
        let mut selected = vec![first.index];
        let mut last_end = first.end;
        rec.count_operation();
        rec.record(ActivityStep::Select {
            activity: first,
            selected: selected.clone(),
            last_end,
        });

        for &activity in &activities[1..] {
            rec.count_operation();
            if activity.start >= last_end {
                selected.push(activity.index);
                last_end = activity.end;
                rec.record(ActivityStep::Select {
                    activity,
                    selected: selected.clone(),
                    last_end,
                });
            } else {
                rec.record(ActivityStep::Skip {
                    activity,
                    selected: selected.clone(),
                    last_end,
                });
            }
        }
        rec.stop_clock();

        rec.record(ActivityStep::Final {
            selected: selected.clone(),
        });
        Ok((selected, rec.finish()))
    }

    /// Optimal count by DP over end-sorted prefixes.
    ///
    /// `best[p]` is the largest compatible set among the first `p` sorted
    /// activities. The selected set may differ from the greedy one.
    pub fn dp_select(
        &self,
        starts: &[i64],
        ends: &[i64],
    ) -> Result<(Vec<usize>, Run<ActivityStep>)> {
        let activities = sorted_by_end(starts, ends)?;
        let n = activities.len();
        tracing::debug!(activities = n, "activity selection, dp");

        let mut rec = Recorder::new("Activity Selection (DP)");
        if n == 0 {
            return Ok((Vec::new(), rec.finish()));
        }
        rec.record(ActivityStep::Init {
            activities: activities.clone(),
        });

        rec.start_clock();
        let mut best = vec![0usize; n + 1];
        let mut compatible = vec![0usize; n + 1];
        rec.note_space((2 * (n + 1)) as u64);
        for p in 1..=n {
            let activity = activities[p - 1];
            // latest earlier activity that ends by the time this one starts
            let mut q = p - 1;
            while q > 0 && activities[q - 1].end > activity.start {
                q -= 1;
            }
            compatible[p] = q;
            rec.count_operation();

            let include = best[q] + 1;
            if include > best[p - 1] {
                best[p] = include;
                rec.record(ActivityStep::DpInclude {
                    activity,
                    compatible: q,
                    table: best.clone(),
                });
            } else {
                best[p] = best[p - 1];
                rec.record(ActivityStep::DpExclude {
                    activity,
                    table: best.clone(),
                });
            }
        }

        let mut selected = Vec::new();
        let mut p = n;
        while p > 0 {
            if best[compatible[p]] + 1 > best[p - 1] {
                selected.push(activities[p - 1].index);
                p = compatible[p];
            } else {
                p -= 1;
            }
        }
        selected.reverse();
        rec.stop_clock();

        rec.record(ActivityStep::Final {
            selected: selected.clone(),
        });
        Ok((selected, rec.finish()))
    }

    /// Runs both methods and fails if their counts differ.
    pub fn compare_approaches(&self, starts: &[i64], ends: &[i64]) -> Result<ActivityComparison> {
        let (greedy, greedy_run) = self.select(starts, ends)?;
        let (dp, dp_run) = self.dp_select(starts, ends)?;
        if greedy.len() != dp.len() {
            return Err(Error::Inconsistent {
                check: "activity selection count",
                first: format!("greedy selected {}", greedy.len()),
                second: format!("dp selected {}", dp.len()),
            });
        }
        Ok(ActivityComparison {
            greedy,
            greedy_run,
            dp,
            dp_run,
        })
    }
}

/// Validates the input and returns activities sorted by end time (stable).
fn sorted_by_end(starts: &[i64], ends: &[i64]) -> Result<Vec<Activity>> {
    ensure_same_len("starts", starts.len(), "ends", ends.len())?;
    let mut activities = Vec::with_capacity(starts.len());
    for (index, (&start, &end)) in starts.iter().zip(ends).enumerate() {
        if end < start {
            return Err(Error::ReversedInterval { index, start, end });
        }
        activities.push(Activity { index, start, end });
    }
    activities.sort_by_key(|a| a.end);
    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTS: [i64; 6] = [1, 3, 0, 5, 8, 5];
    const ENDS: [i64; 6] = [2, 4, 6, 7, 9, 9];

    #[test]
    fn test_greedy() {
        let (selected, run) = ActivitySelection.select(&STARTS, &ENDS).unwrap();
        assert_eq!(selected, vec![0, 1, 3, 4]);
        assert_eq!(run.metrics().operations, 6);
        assert!(matches!(run.last_step(), Some(ActivityStep::Final { .. })));
    }

    #[test]
    fn test_dp_matches_count() {
        let (selected, _) = ActivitySelection.dp_select(&STARTS, &ENDS).unwrap();
        assert_eq!(selected.len(), 4);
        let cmp = ActivitySelection.compare_approaches(&STARTS, &ENDS).unwrap();
        assert_eq!(cmp.greedy.len(), cmp.dp.len());
    }

    #[test]
    fn test_dp_selection_is_compatible() {
        let (selected, _) = ActivitySelection.dp_select(&STARTS, &ENDS).unwrap();
        let mut chosen: Vec<_> = selected.iter().map(|&i| (STARTS[i], ENDS[i])).collect();
        chosen.sort_by_key(|&(_, end)| end);
        for pair in chosen.windows(2) {
            assert!(pair[1].0 >= pair[0].1);
        }
    }

    #[test]
    fn test_touching_intervals_are_compatible() {
        let (selected, _) = ActivitySelection.select(&[0, 2], &[2, 4]).unwrap();
        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn test_empty() {
        let (selected, run) = ActivitySelection.select(&[], &[]).unwrap();
        assert!(selected.is_empty());
        assert!(run.is_empty());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            ActivitySelection.select(&[1, 2], &[3]),
            Err(Error::LengthMismatch { .. })
        ));
        assert_eq!(
            ActivitySelection.dp_select(&[5], &[1]).unwrap_err(),
            Error::ReversedInterval {
                index: 0,
                start: 5,
                end: 1
            }
        );
    }

    #[test]
    fn test_display() {
        let a = Activity {
            index: 2,
            start: 0,
            end: 6,
        };
        assert_eq!(a.to_string(), "A2 (0-6)");
    }
}
