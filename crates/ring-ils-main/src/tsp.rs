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

//! Toy Euclidean travelling-salesman domain exercising every framework
//! contract: instance, solution, constructor, shake, improver, validator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{
    Constructor, DynError, Improver, Instance, Shake, Solution, SolutionValidator,
};
use std::sync::Arc;
use std::time::Instant;

/// Symmetric Euclidean instance over randomly placed cities.
pub struct TspInstance {
    id: String,
    distances: Vec<Vec<f64>>,
}

impl TspInstance {
    /// Places `cities` points uniformly in a 100x100 square.
    pub fn random(id: impl Into<String>, cities: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..cities)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let distances = points
            .iter()
            .map(|&(ax, ay)| {
                points
                    .iter()
                    .map(|&(bx, by)| ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        Self {
            id: id.into(),
            distances,
        }
    }

    #[inline]
    pub fn cities(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a][b]
    }

    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let mut total = 0.0;
        for i in 0..tour.len() {
            total += self.distance(tour[i], tour[(i + 1) % tour.len()]);
        }
        total
    }
}

impl Instance for TspInstance {
    fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Debug for TspInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TspInstance")
            .field("id", &self.id)
            .field("cities", &self.cities())
            .finish()
    }
}

/// A closed tour visiting every city once. Tied to its instance; clones
/// share the immutable instance but own their tour.
#[derive(Debug, Clone)]
pub struct TspSolution {
    instance: Arc<TspInstance>,
    tour: Vec<usize>,
    length: f64,
    last_modified: Instant,
}

impl TspSolution {
    fn new(instance: Arc<TspInstance>, tour: Vec<usize>) -> Self {
        let length = instance.tour_length(&tour);
        Self {
            instance,
            tour,
            length,
            last_modified: Instant::now(),
        }
    }

    #[inline]
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    #[inline]
    fn touch(&mut self) {
        self.last_modified = Instant::now();
    }
}

impl Solution for TspSolution {
    fn score(&self) -> f64 {
        self.length
    }

    fn last_modified(&self) -> Instant {
        self.last_modified
    }
}

/// Nearest-neighbor construction from a random start city.
pub struct NearestNeighborConstructor {
    instance: Arc<TspInstance>,
}

impl NearestNeighborConstructor {
    pub fn new(instance: Arc<TspInstance>) -> Self {
        Self { instance }
    }
}

impl Constructor<TspInstance, TspSolution, ChaCha8Rng> for NearestNeighborConstructor {
    fn construct(
        &self,
        instance: &TspInstance,
        rng: &mut ChaCha8Rng,
    ) -> Result<TspSolution, DynError> {
        let n = instance.cities();
        if n == 0 {
            return Err("instance has no cities".into());
        }
        let mut remaining: Vec<usize> = (0..n).collect();
        let start = remaining.swap_remove(rng.random_range(0..n));
        let mut tour = vec![start];
        while !remaining.is_empty() {
            let last = *tour.last().unwrap();
            let (pos, _) = remaining
                .iter()
                .enumerate()
                .min_by(|&(_, &a), &(_, &b)| {
                    instance
                        .distance(last, a)
                        .total_cmp(&instance.distance(last, b))
                })
                .unwrap();
            tour.push(remaining.swap_remove(pos));
        }
        Ok(TspSolution::new(Arc::clone(&self.instance), tour))
    }
}

/// Reverses `strength` random segments of the tour.
pub struct SegmentReverseShake;

impl Shake<TspSolution, ChaCha8Rng> for SegmentReverseShake {
    fn shake(
        &self,
        solution: &mut TspSolution,
        strength: u32,
        rng: &mut ChaCha8Rng,
    ) -> Result<(), DynError> {
        let n = solution.tour.len();
        if n < 3 {
            return Ok(());
        }
        for _ in 0..strength {
            let mut i = rng.random_range(0..n);
            let mut j = rng.random_range(0..n);
            if i > j {
                std::mem::swap(&mut i, &mut j);
            }
            solution.tour[i..=j].reverse();
        }
        solution.length = solution.instance.tour_length(&solution.tour);
        Ok(())
    }
}

/// First-improvement 2-opt descent, bounded by a pass limit.
pub struct TwoOptImprover {
    max_passes: usize,
}

impl TwoOptImprover {
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }
}

impl Improver<TspSolution, ChaCha8Rng> for TwoOptImprover {
    fn improve(&self, solution: &mut TspSolution, _rng: &mut ChaCha8Rng) -> Result<(), DynError> {
        let n = solution.tour.len();
        if n < 4 {
            return Ok(());
        }
        let instance = Arc::clone(&solution.instance);
        let mut improved_any = false;

        for _ in 0..self.max_passes {
            let mut improved = false;
            for i in 1..n - 1 {
                for j in i + 1..n {
                    let a = solution.tour[i - 1];
                    let b = solution.tour[i];
                    let c = solution.tour[j];
                    let d = solution.tour[(j + 1) % n];
                    let delta = instance.distance(a, c) + instance.distance(b, d)
                        - instance.distance(a, b)
                        - instance.distance(c, d);
                    if delta < -1e-9 {
                        solution.tour[i..=j].reverse();
                        solution.length += delta;
                        improved = true;
                        improved_any = true;
                    }
                }
            }
            if !improved {
                break;
            }
        }

        if improved_any {
            // Re-sum to keep the cached length free of drift.
            solution.length = instance.tour_length(&solution.tour);
            solution.touch();
        }
        Ok(())
    }
}

/// Post-condition check: the tour is a permutation of all cities and the
/// cached length matches a recomputation.
pub struct TourValidator;

impl SolutionValidator<TspInstance, TspSolution> for TourValidator {
    fn validate(&self, instance: &TspInstance, solution: &TspSolution) -> Result<(), DynError> {
        let n = instance.cities();
        if solution.tour.len() != n {
            return Err(format!("tour visits {} of {} cities", solution.tour.len(), n).into());
        }
        let mut seen = vec![false; n];
        for &city in &solution.tour {
            if city >= n || seen[city] {
                return Err(format!("tour is not a permutation, city {city} repeats").into());
            }
            seen[city] = true;
        }
        let recomputed = instance.tour_length(&solution.tour);
        if (recomputed - solution.length).abs() > 1e-6 {
            return Err(format!(
                "cached tour length {} differs from recomputed {}",
                solution.length, recomputed
            )
            .into());
        }
        Ok(())
    }
}
