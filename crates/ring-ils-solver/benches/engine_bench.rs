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

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{
    Algorithm, Constructor, DynError, Improver, Instance, Objective, Shake, Solution,
};
use ring_ils_solver::prelude::{DrainPolicy, RingExchangeIls, WorkerConfig};
use std::time::Instant;

struct BenchInstance;

impl Instance for BenchInstance {
    fn id(&self) -> &str {
        "bench"
    }
}

#[derive(Debug, Clone)]
struct BenchSolution {
    score: f64,
    stamp: Instant,
}

impl Solution for BenchSolution {
    fn score(&self) -> f64 {
        self.score
    }

    fn last_modified(&self) -> Instant {
        self.stamp
    }
}

struct BenchConstructor;

impl<R: Rng> Constructor<BenchInstance, BenchSolution, R> for BenchConstructor {
    fn construct(&self, _: &BenchInstance, rng: &mut R) -> Result<BenchSolution, DynError> {
        Ok(BenchSolution {
            score: rng.random_range(500.0..1000.0),
            stamp: Instant::now(),
        })
    }
}

struct BenchShake;

impl<R: Rng> Shake<BenchSolution, R> for BenchShake {
    fn shake(&self, solution: &mut BenchSolution, strength: u32, rng: &mut R) -> Result<(), DynError> {
        for _ in 0..strength {
            solution.score += rng.random_range(-10.0..10.0);
        }
        Ok(())
    }
}

struct BenchImprover;

impl<R: Rng> Improver<BenchSolution, R> for BenchImprover {
    fn improve(&self, solution: &mut BenchSolution, _: &mut R) -> Result<(), DynError> {
        solution.score -= solution.score.fract();
        solution.stamp = Instant::now();
        Ok(())
    }
}

fn ring_engine(workers: usize, total_shakes: u64) -> RingExchangeIls<BenchInstance, BenchSolution> {
    let configs: Vec<WorkerConfig<BenchInstance, BenchSolution>> = (0..workers)
        .map(|_| {
            WorkerConfig::new(
                Box::new(BenchConstructor),
                Box::new(BenchShake),
                Box::new(BenchImprover),
                4,
                total_shakes,
            )
        })
        .collect();
    RingExchangeIls::new(Objective::of_minimizing("score"), 2, configs)
        .with_drain_policy(DrainPolicy::Disabled)
}

fn bench_ring_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_engine");
    for workers in [1usize, 2, 4] {
        let total_shakes = (workers * 2 * 256) as u64;
        group.bench_function(format!("workers_{workers}"), |b| {
            let engine = ring_engine(workers, total_shakes);
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(7);
                engine.run(&BenchInstance, &mut rng).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ring_engine);
criterion_main!(benches);
