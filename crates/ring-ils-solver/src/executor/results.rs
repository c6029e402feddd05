// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::executor::work_unit::WorkUnitResult;
use parking_lot::Mutex;
use ring_ils_model::prelude::{Objective, Solution};
use serde::Serialize;

/// Accumulates completed work-unit results for one (algorithm, instance)
/// pair while repetitions run concurrently. Failed repetitions are simply
/// absent.
pub struct RunningResults<S>
where
    S: Solution,
{
    algorithm: String,
    instance: String,
    repetitions: usize,
    entries: Mutex<Vec<WorkUnitResult<S>>>,
}

impl<S> RunningResults<S>
where
    S: Solution,
{
    pub fn new(
        algorithm: impl Into<String>,
        instance: impl Into<String>,
        repetitions: usize,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            instance: instance.into(),
            repetitions,
            entries: Mutex::new(Vec::with_capacity(repetitions)),
        }
    }

    pub fn add(&self, result: WorkUnitResult<S>) {
        self.entries.lock().push(result);
    }

    /// Seals the accumulator into an immutable summary. Results are sorted
    /// by repetition index so the summary is independent of completion
    /// order.
    pub fn finish(&self) -> AlgorithmSummary<S> {
        let mut results = std::mem::take(&mut *self.entries.lock());
        results.sort_by_key(|r| r.repetition);
        AlgorithmSummary {
            algorithm: self.algorithm.clone(),
            instance: self.instance.clone(),
            repetitions: self.repetitions,
            results,
        }
    }
}

/// Aggregated per-algorithm outcome of one scheduler execution, exposed to
/// external reporting and export layers.
#[derive(Debug, Clone)]
pub struct AlgorithmSummary<S>
where
    S: Solution,
{
    pub algorithm: String,
    pub instance: String,
    /// Requested repetition count; `results` may be shorter when units
    /// failed or were skipped.
    pub repetitions: usize,
    pub results: Vec<WorkUnitResult<S>>,
}

impl<S> AlgorithmSummary<S>
where
    S: Solution,
{
    #[inline]
    pub fn completed(&self) -> usize {
        self.results.len()
    }

    /// Best completed result under the given objective.
    pub fn best(&self, objective: &Objective) -> Option<&WorkUnitResult<S>> {
        let mut iter = self.results.iter();
        let mut best = iter.next()?;
        for candidate in iter {
            if objective.is_better(candidate.solution.score(), best.solution.score()) {
                best = candidate;
            }
        }
        Some(best)
    }

    /// Flat serializable view of the completed repetitions.
    pub fn records(&self) -> Vec<SummaryRecord> {
        self.results
            .iter()
            .map(|r| SummaryRecord {
                algorithm: self.algorithm.clone(),
                instance: self.instance.clone(),
                repetition: r.repetition,
                score: r.solution.score(),
                elapsed_secs: r.elapsed.as_secs_f64(),
                time_to_target_secs: r.time_to_target.as_secs_f64(),
            })
            .collect()
    }
}

/// One exported repetition row.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    pub algorithm: String,
    pub instance: String,
    pub repetition: usize,
    pub score: f64,
    pub elapsed_secs: f64,
    pub time_to_target_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[derive(Debug, Clone)]
    struct Scored {
        score: f64,
        stamp: Instant,
    }

    impl Solution for Scored {
        fn score(&self) -> f64 {
            self.score
        }

        fn last_modified(&self) -> Instant {
            self.stamp
        }
    }

    fn result(repetition: usize, score: f64) -> WorkUnitResult<Scored> {
        WorkUnitResult {
            repetition,
            solution: Scored {
                score,
                stamp: Instant::now(),
            },
            elapsed: Duration::from_millis(10 + repetition as u64),
            time_to_target: Duration::from_millis(repetition as u64),
        }
    }

    #[test]
    fn test_finish_sorts_by_repetition() {
        let running = RunningResults::new("alg", "inst", 3);
        running.add(result(2, 5.0));
        running.add(result(0, 7.0));
        running.add(result(1, 6.0));

        let summary = running.finish();
        assert_eq!(summary.completed(), 3);
        let order: Vec<usize> = summary.results.iter().map(|r| r.repetition).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_best_follows_the_objective() {
        let running = RunningResults::new("alg", "inst", 3);
        running.add(result(0, 7.0));
        running.add(result(1, 3.0));
        running.add(result(2, 5.0));
        let summary = running.finish();

        let min = Objective::of_minimizing("score");
        assert_eq!(summary.best(&min).unwrap().repetition, 1);
        let max = Objective::of_maximizing("score");
        assert_eq!(summary.best(&max).unwrap().repetition, 0);
    }

    #[test]
    fn test_best_of_empty_summary_is_none() {
        let running: RunningResults<Scored> = RunningResults::new("alg", "inst", 2);
        let summary = running.finish();
        assert!(summary.best(&Objective::of_minimizing("score")).is_none());
    }

    #[test]
    fn test_records_carry_identifiers_and_timings() {
        let running = RunningResults::new("alg", "inst", 1);
        running.add(result(0, 4.5));
        let summary = running.finish();

        let records = summary.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.algorithm, "alg");
        assert_eq!(record.instance, "inst");
        assert_eq!(record.repetition, 0);
        assert_eq!(record.score, 4.5);
        assert!(record.elapsed_secs >= record.time_to_target_secs);
    }
}
