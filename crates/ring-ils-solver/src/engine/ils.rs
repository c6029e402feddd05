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

//! Parallel iterated local search with ring exchange.
//!
//! N workers hold one ring position each. After a parallel construction
//! phase the engine runs R rotation rounds: every worker performs its
//! fixed share of shake-improve iterations, opportunistically drains while
//! slower workers catch up, pushes its incumbent to its successor, meets
//! the others at a barrier, and adopts its predecessor's incumbent for the
//! next round. After R rounds the single best final solution wins.

use crate::engine::err::EngineError;
use crate::engine::ring::ring_channels;
use crate::engine::sync::{ActiveCounter, CyclicBarrier};
use crate::engine::worker::{RingWorker, WorkerFailure};
use crate::rng::derive_rng;
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{
    Algorithm, Constructor, DynError, Improver, Instance, Objective, Shake, Solution,
};

/// Behavior of the post-share drain loop.
///
/// The drain is a spin-poll on the active counter with a full search
/// iteration between probes: low hand-off latency at the price of busy
/// CPUs. `SpinYield` bounds the cost on oversubscribed hosts; `Disabled`
/// skips draining entirely, which also makes multi-worker runs
/// deterministic for a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrainPolicy {
    Disabled,
    #[default]
    Spin,
    SpinYield,
}

/// Immutable strategy bundle bound to exactly one ring position for the
/// lifetime of a run.
pub struct WorkerConfig<I, S>
where
    I: Instance,
    S: Solution,
{
    pub constructor: Box<dyn Constructor<I, S, ChaCha8Rng>>,
    pub shake: Box<dyn Shake<S, ChaCha8Rng>>,
    pub improver: Box<dyn Improver<S, ChaCha8Rng>>,
    pub shake_strength: u32,
    /// Total shake budget for this position, split evenly over
    /// `workers * rounds`.
    pub total_shakes: u64,
}

impl<I, S> WorkerConfig<I, S>
where
    I: Instance,
    S: Solution,
{
    pub fn new(
        constructor: Box<dyn Constructor<I, S, ChaCha8Rng>>,
        shake: Box<dyn Shake<S, ChaCha8Rng>>,
        improver: Box<dyn Improver<S, ChaCha8Rng>>,
        shake_strength: u32,
        total_shakes: u64,
    ) -> Self {
        Self {
            constructor,
            shake,
            improver,
            shake_strength,
            total_shakes,
        }
    }
}

impl<I, S> std::fmt::Debug for WorkerConfig<I, S>
where
    I: Instance,
    S: Solution,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerConfig")
            .field("shake_strength", &self.shake_strength)
            .field("total_shakes", &self.total_shakes)
            .finish()
    }
}

/// The ring-exchange ILS engine. One instance may be scheduled for many
/// repetitions concurrently; each `run` builds its own ring, counter,
/// barrier and worker threads and tears them down before returning.
pub struct RingExchangeIls<I, S>
where
    I: Instance,
    S: Solution,
{
    name: String,
    objective: Objective,
    rounds: usize,
    drain: DrainPolicy,
    configs: Vec<WorkerConfig<I, S>>,
}

impl<I, S> RingExchangeIls<I, S>
where
    I: Instance,
    S: Solution,
{
    pub fn new(objective: Objective, rounds: usize, configs: Vec<WorkerConfig<I, S>>) -> Self {
        let name = format!("ring-ils[workers={}, rounds={}]", configs.len(), rounds);
        Self {
            name,
            objective,
            rounds,
            drain: DrainPolicy::default(),
            configs,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_drain_policy(mut self, drain: DrainPolicy) -> Self {
        self.drain = drain;
        self
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.configs.len()
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Validates the configuration and computes each worker's fixed
    /// per-round share. An indivisible budget is an error, not a silent
    /// truncation.
    fn shares(&self) -> Result<Vec<u64>, EngineError> {
        let workers = self.configs.len();
        if workers == 0 {
            return Err(EngineError::NoWorkers);
        }
        if self.rounds == 0 {
            return Err(EngineError::NoRounds);
        }
        let slots = (workers * self.rounds) as u64;
        let mut shares = Vec::with_capacity(workers);
        for (worker, config) in self.configs.iter().enumerate() {
            if config.total_shakes % slots != 0 {
                return Err(EngineError::UnevenShakeBudget {
                    worker,
                    total_shakes: config.total_shakes,
                    workers,
                    rounds: self.rounds,
                });
            }
            shares.push(config.total_shakes / slots);
        }
        Ok(shares)
    }

    /// Runs one complete ring execution and returns every worker's final
    /// solution, in ring order.
    pub(crate) fn run_ring(
        &self,
        instance: &I,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<S>, EngineError> {
        let workers = self.configs.len();
        let shares = self.shares()?;

        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        if available < workers {
            tracing::warn!(
                available,
                workers,
                "fewer hardware threads than ring workers, performance may be reduced"
            );
        }

        // Every worker draws its generator from the task generator, so a
        // fixed task seed fixes the whole run.
        let mut worker_rngs: Vec<ChaCha8Rng> = (0..workers).map(|_| derive_rng(rng)).collect();

        // Phase CONSTRUCT: all initial solutions are built in parallel and
        // joined before any rotation starts.
        let built: Vec<Result<S, DynError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .configs
                .iter()
                .zip(worker_rngs.iter_mut())
                .map(|(config, worker_rng)| {
                    scope.spawn(move || config.constructor.construct(instance, worker_rng))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });
        let mut initials = Vec::with_capacity(workers);
        for (worker, outcome) in built.into_iter().enumerate() {
            match outcome {
                Ok(solution) => initials.push(solution),
                Err(source) => return Err(EngineError::Construction { worker, source }),
            }
        }

        // Phase ROTATE: per-run ring wiring, counter and barrier. The
        // barrier's action re-arms the counter before releasing anyone
        // into the next round.
        let active = ActiveCounter::new(workers);
        let barrier = CyclicBarrier::with_action(workers, || active.reset(workers));
        let channels = ring_channels::<S>(workers);

        let rounds = self.rounds;
        let drain = self.drain;
        let objective = &self.objective;
        let active_ref = &active;
        let barrier_ref = &barrier;

        let outcomes: Vec<Result<S, WorkerFailure>> = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .configs
                .iter()
                .zip(initials)
                .zip(channels)
                .zip(worker_rngs)
                .enumerate()
                .map(|(index, (((config, initial), (next, prev)), worker_rng))| {
                    let share = shares[index];
                    scope.spawn(move || {
                        RingWorker::new(
                            index, config, objective, share, rounds, drain, active_ref,
                            barrier_ref, next, prev, worker_rng,
                        )
                        .run(initial)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut finals = Vec::with_capacity(workers);
        let mut aborted = false;
        for (worker, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(solution) => finals.push(solution),
                Err(WorkerFailure::Strategy(source)) => {
                    return Err(EngineError::Worker { worker, source });
                }
                Err(WorkerFailure::Aborted) => aborted = true,
            }
        }
        if aborted {
            return Err(EngineError::Aborted);
        }
        Ok(finals)
    }
}

impl<I, S> Algorithm<I, S, ChaCha8Rng> for RingExchangeIls<I, S>
where
    I: Instance,
    S: Solution,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, instance: &I, rng: &mut ChaCha8Rng) -> Result<S, DynError> {
        let finals = self.run_ring(instance, rng)?;
        self.objective
            .best(finals)
            .ok_or_else(|| DynError::from("ring engine produced no final solutions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, Instant};

    struct TestInstance;

    impl Instance for TestInstance {
        fn id(&self) -> &str {
            "test-instance"
        }
    }

    #[derive(Debug, Clone)]
    struct TaggedSolution {
        score: f64,
        origin: usize,
        stamp: Instant,
    }

    impl Solution for TaggedSolution {
        fn score(&self) -> f64 {
            self.score
        }

        fn last_modified(&self) -> Instant {
            self.stamp
        }
    }

    /// Builds a solution tagged with the ring position it came from.
    struct TaggedConstructor {
        origin: usize,
        score: f64,
    }

    impl<R: Rng> Constructor<TestInstance, TaggedSolution, R> for TaggedConstructor {
        fn construct(&self, _: &TestInstance, _: &mut R) -> Result<TaggedSolution, DynError> {
            Ok(TaggedSolution {
                score: self.score,
                origin: self.origin,
                stamp: Instant::now(),
            })
        }
    }

    struct NoopShake;

    impl<R: Rng> Shake<TaggedSolution, R> for NoopShake {
        fn shake(&self, _: &mut TaggedSolution, _: u32, _: &mut R) -> Result<(), DynError> {
            Ok(())
        }
    }

    struct NoopImprover;

    impl<R: Rng> Improver<TaggedSolution, R> for NoopImprover {
        fn improve(&self, _: &mut TaggedSolution, _: &mut R) -> Result<(), DynError> {
            Ok(())
        }
    }

    /// Rerolls the clone's score; with minimization the incumbent only
    /// ever improves.
    struct RerollShake;

    impl<R: Rng> Shake<TaggedSolution, R> for RerollShake {
        fn shake(&self, solution: &mut TaggedSolution, _: u32, rng: &mut R) -> Result<(), DynError> {
            solution.score = rng.random_range(0.0..1000.0);
            solution.stamp = Instant::now();
            Ok(())
        }
    }

    struct CountingShake {
        count: Arc<AtomicU64>,
        delay: Option<Duration>,
    }

    impl<R: Rng> Shake<TaggedSolution, R> for CountingShake {
        fn shake(&self, _: &mut TaggedSolution, _: u32, _: &mut R) -> Result<(), DynError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            Ok(())
        }
    }

    struct FailingShake {
        calls: AtomicU64,
        fail_at: u64,
    }

    impl<R: Rng> Shake<TaggedSolution, R> for FailingShake {
        fn shake(&self, _: &mut TaggedSolution, _: u32, _: &mut R) -> Result<(), DynError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.fail_at {
                return Err("shake exploded".into());
            }
            Ok(())
        }
    }

    struct FailingConstructor;

    impl<R: Rng> Constructor<TestInstance, TaggedSolution, R> for FailingConstructor {
        fn construct(&self, _: &TestInstance, _: &mut R) -> Result<TaggedSolution, DynError> {
            Err("no initial solution".into())
        }
    }

    fn noop_config(origin: usize, score: f64, total_shakes: u64) -> WorkerConfig<TestInstance, TaggedSolution> {
        WorkerConfig::new(
            Box::new(TaggedConstructor { origin, score }),
            Box::new(NoopShake),
            Box::new(NoopImprover),
            1,
            total_shakes,
        )
    }

    #[test]
    fn test_rejects_empty_worker_set() {
        let engine: RingExchangeIls<TestInstance, TaggedSolution> =
            RingExchangeIls::new(Objective::of_minimizing("score"), 2, Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            engine.run_ring(&TestInstance, &mut rng),
            Err(EngineError::NoWorkers)
        ));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let engine = RingExchangeIls::new(
            Objective::of_minimizing("score"),
            0,
            vec![noop_config(0, 1.0, 8)],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            engine.run_ring(&TestInstance, &mut rng),
            Err(EngineError::NoRounds)
        ));
    }

    #[test]
    fn test_rejects_uneven_shake_budget() {
        // 400 is not divisible by 3 workers x 2 rounds.
        let engine = RingExchangeIls::new(
            Objective::of_minimizing("score"),
            2,
            vec![
                noop_config(0, 1.0, 400),
                noop_config(1, 2.0, 400),
                noop_config(2, 3.0, 400),
            ],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        match engine.run_ring(&TestInstance, &mut rng) {
            Err(EngineError::UnevenShakeBudget {
                worker,
                total_shakes,
                workers,
                rounds,
            }) => {
                assert_eq!(worker, 0);
                assert_eq!(total_shakes, 400);
                assert_eq!(workers, 3);
                assert_eq!(rounds, 2);
            }
            other => panic!("expected UnevenShakeBudget, got {other:?}"),
        }
    }

    #[test]
    fn test_exchange_adopts_predecessor_solution_each_round() {
        // Noop strategies never beat the incumbent, so after R rounds each
        // worker must hold the solution constructed R positions behind it.
        for rounds in [1, 2, 3] {
            let workers = 4;
            let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..workers)
                .map(|k| noop_config(k, 100.0 + k as f64, (workers * rounds * 5) as u64))
                .collect();
            let engine = RingExchangeIls::new(Objective::of_minimizing("score"), rounds, configs)
                .with_drain_policy(DrainPolicy::Disabled);
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let finals = engine.run_ring(&TestInstance, &mut rng).unwrap();

            assert_eq!(finals.len(), workers);
            for (k, solution) in finals.iter().enumerate() {
                let expected_origin = (k + workers - rounds % workers) % workers;
                assert_eq!(
                    solution.origin, expected_origin,
                    "worker {k} after {rounds} rounds"
                );
            }
            // A permutation: every origin still present exactly once, so
            // every channel saw exactly one push and one pop per round.
            let mut origins: Vec<usize> = finals.iter().map(|s| s.origin).collect();
            origins.sort_unstable();
            assert_eq!(origins, (0..workers).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_single_worker_degenerates_to_sequential_ils() {
        let config: WorkerConfig<TestInstance, TaggedSolution> = WorkerConfig::new(
            Box::new(TaggedConstructor {
                origin: 0,
                score: 900.0,
            }),
            Box::new(RerollShake),
            Box::new(NoopImprover),
            1,
            40,
        );
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, vec![config]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let best = engine.run(&TestInstance, &mut rng).unwrap();
        assert!(best.score <= 900.0);
    }

    #[test]
    fn test_fixed_seed_is_reproducible_sequentially() {
        let run = || {
            let config: WorkerConfig<TestInstance, TaggedSolution> = WorkerConfig::new(
                Box::new(TaggedConstructor {
                    origin: 0,
                    score: 900.0,
                }),
                Box::new(RerollShake),
                Box::new(NoopImprover),
                1,
                60,
            );
            let engine =
                RingExchangeIls::new(Objective::of_minimizing("score"), 3, vec![config]);
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            engine.run(&TestInstance, &mut rng).unwrap().score
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_fixed_seed_is_reproducible_with_drain_disabled() {
        // Without the opportunistic drain every worker performs exactly
        // its share, so thread scheduling cannot leak into the result.
        let run = || {
            let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..4)
                .map(|k| {
                    WorkerConfig::new(
                        Box::new(TaggedConstructor {
                            origin: k,
                            score: 900.0,
                        }),
                        Box::new(RerollShake),
                        Box::new(NoopImprover),
                        1,
                        400,
                    )
                })
                .collect();
            let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs)
                .with_drain_policy(DrainPolicy::Disabled);
            let mut rng = ChaCha8Rng::seed_from_u64(13);
            let finals = engine.run_ring(&TestInstance, &mut rng).unwrap();
            finals.iter().map(|s| s.score).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_scenario_four_workers_two_rounds() {
        // 400 shakes over 4 workers x 2 rounds: a fixed share of 50 per
        // worker per round; with the drain disabled the counts are exact.
        let workers = 4;
        let counters: Vec<Arc<AtomicU64>> =
            (0..workers).map(|_| Arc::new(AtomicU64::new(0))).collect();
        let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..workers)
            .map(|k| {
                WorkerConfig::new(
                    Box::new(TaggedConstructor {
                        origin: k,
                        score: 10.0 * (k + 1) as f64,
                    }),
                    Box::new(CountingShake {
                        count: Arc::clone(&counters[k]),
                        delay: None,
                    }),
                    Box::new(NoopImprover),
                    1,
                    400,
                )
            })
            .collect();
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs)
            .with_drain_policy(DrainPolicy::Disabled);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let finals = engine.run_ring(&TestInstance, &mut rng).unwrap();

        for counter in &counters {
            assert_eq!(counter.load(Ordering::SeqCst), 100);
        }
        // Two rounds moved every solution two positions along the ring.
        for (k, solution) in finals.iter().enumerate() {
            assert_eq!(solution.origin, (k + workers - 2) % workers);
        }
        // The returned best is the best of the four finals.
        let objective = Objective::of_minimizing("score");
        let best = objective.best(finals).unwrap();
        assert_eq!(best.score, 10.0);
    }

    #[test]
    fn test_drain_keeps_fast_workers_busy() {
        // Worker 0 sleeps through its share while worker 1 spins; the
        // drain loop must give worker 1 extra iterations beyond its share.
        let slow = Arc::new(AtomicU64::new(0));
        let fast = Arc::new(AtomicU64::new(0));
        let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = vec![
            WorkerConfig::new(
                Box::new(TaggedConstructor {
                    origin: 0,
                    score: 1.0,
                }),
                Box::new(CountingShake {
                    count: Arc::clone(&slow),
                    delay: Some(Duration::from_millis(20)),
                }),
                Box::new(NoopImprover),
                1,
                6,
            ),
            WorkerConfig::new(
                Box::new(TaggedConstructor {
                    origin: 1,
                    score: 2.0,
                }),
                Box::new(CountingShake {
                    count: Arc::clone(&fast),
                    delay: None,
                }),
                Box::new(NoopImprover),
                1,
                6,
            ),
        ];
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 1, configs)
            .with_drain_policy(DrainPolicy::SpinYield);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        engine.run_ring(&TestInstance, &mut rng).unwrap();

        assert_eq!(slow.load(Ordering::SeqCst), 3);
        assert!(fast.load(Ordering::SeqCst) > 3);
    }

    #[test]
    fn test_construction_failure_aborts_the_run() {
        let configs = vec![
            noop_config(0, 1.0, 4),
            WorkerConfig::new(
                Box::new(FailingConstructor),
                Box::new(NoopShake),
                Box::new(NoopImprover),
                1,
                4,
            ),
        ];
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        match engine.run_ring(&TestInstance, &mut rng) {
            Err(EngineError::Construction { worker, .. }) => assert_eq!(worker, 1),
            other => panic!("expected Construction error, got {other:?}"),
        }
    }

    #[test]
    fn test_worker_failure_aborts_the_run_without_deadlock() {
        // Worker 1 fails mid-share; every sibling must unwind through the
        // poisoned counter / broken barrier and the engine must report the
        // originating worker.
        let workers = 3;
        let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..workers)
            .map(|k| {
                let shake: Box<dyn Shake<TaggedSolution, ChaCha8Rng>> = if k == 1 {
                    Box::new(FailingShake {
                        calls: AtomicU64::new(0),
                        fail_at: 5,
                    })
                } else {
                    Box::new(NoopShake)
                };
                WorkerConfig::new(
                    Box::new(TaggedConstructor {
                        origin: k,
                        score: 1.0,
                    }),
                    shake,
                    Box::new(NoopImprover),
                    1,
                    30,
                )
            })
            .collect();
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        match engine.run_ring(&TestInstance, &mut rng) {
            Err(EngineError::Worker { worker, source }) => {
                assert_eq!(worker, 1);
                assert_eq!(source.to_string(), "shake exploded");
            }
            other => panic!("expected Worker error, got {other:?}"),
        }
    }

    #[test]
    fn test_algorithm_returns_single_best() {
        let workers = 4;
        let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..workers)
            .map(|k| noop_config(k, 50.0 - k as f64, (workers * 2 * 3) as u64))
            .collect();
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let best = engine.run(&TestInstance, &mut rng).unwrap();
        // Exchange only moves solutions around; the best constructed score
        // must survive and win.
        assert_eq!(best.score, 47.0);
        assert_eq!(best.origin, 3);
    }

    #[test]
    fn test_counts_track_total_iterations_with_drain() {
        // With the default spin drain the fixed share is a lower bound.
        let counters: Vec<Arc<AtomicU64>> = (0..2).map(|_| Arc::new(AtomicU64::new(0))).collect();
        let configs: Vec<WorkerConfig<TestInstance, TaggedSolution>> = (0..2)
            .map(|k| {
                WorkerConfig::new(
                    Box::new(TaggedConstructor {
                        origin: k,
                        score: 1.0,
                    }),
                    Box::new(CountingShake {
                        count: Arc::clone(&counters[k]),
                        delay: None,
                    }),
                    Box::new(NoopImprover),
                    1,
                    40,
                )
            })
            .collect();
        let engine = RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs);
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        engine.run_ring(&TestInstance, &mut rng).unwrap();
        for counter in &counters {
            assert!(counter.load(Ordering::SeqCst) >= 20);
        }
    }

    #[test]
    fn test_name_reflects_topology() {
        let engine: RingExchangeIls<TestInstance, TaggedSolution> = RingExchangeIls::new(
            Objective::of_minimizing("score"),
            2,
            vec![noop_config(0, 1.0, 4), noop_config(1, 2.0, 4)],
        );
        assert_eq!(engine.name(), "ring-ils[workers=2, rounds=2]");
        let renamed = engine.with_name("ring-2x2");
        assert_eq!(renamed.name(), "ring-2x2");
    }
}
