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

use crate::engine::ils::{DrainPolicy, WorkerConfig};
use crate::engine::ring::{RingReceiver, RingSender};
use crate::engine::sync::{ActiveCounter, CyclicBarrier};
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{DynError, Instance, Objective, Solution};

/// Why a ring worker stopped early.
#[derive(Debug)]
pub(crate) enum WorkerFailure {
    /// A strategy call failed on this worker; the root cause of the abort.
    Strategy(DynError),
    /// This worker was torn down because a sibling failed.
    Aborted,
}

/// One position in the ring. Owns its incumbent solution at all times
/// except while it travels through a hand-off channel.
pub(crate) struct RingWorker<'a, I, S>
where
    I: Instance,
    S: Solution,
{
    index: usize,
    config: &'a WorkerConfig<I, S>,
    objective: &'a Objective,
    share: u64,
    rounds: usize,
    drain: DrainPolicy,
    active: &'a ActiveCounter,
    barrier: &'a CyclicBarrier<'a>,
    next: RingSender<S>,
    prev: RingReceiver<S>,
    rng: ChaCha8Rng,
}

impl<'a, I, S> RingWorker<'a, I, S>
where
    I: Instance,
    S: Solution,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        config: &'a WorkerConfig<I, S>,
        objective: &'a Objective,
        share: u64,
        rounds: usize,
        drain: DrainPolicy,
        active: &'a ActiveCounter,
        barrier: &'a CyclicBarrier<'a>,
        next: RingSender<S>,
        prev: RingReceiver<S>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            index,
            config,
            objective,
            share,
            rounds,
            drain,
            active,
            barrier,
            next,
            prev,
            rng,
        }
    }

    pub(crate) fn run(mut self, initial: S) -> Result<S, WorkerFailure> {
        let mut best = initial;

        for _round in 0..self.rounds {
            // Fixed share of this round's work.
            for _ in 0..self.share {
                best = match self.iteration(best) {
                    Ok(improved) => improved,
                    Err(error) => return Err(self.fail(error)),
                };
            }
            self.active.finish_share();

            // Opportunistic drain: instead of idling on load imbalance,
            // keep searching until every worker has finished its share.
            // This is a deliberate spin-poll; each probe of the counter is
            // separated by a full search iteration.
            if self.drain != DrainPolicy::Disabled {
                while self.active.busy() {
                    best = match self.iteration(best) {
                        Ok(improved) => improved,
                        Err(error) => return Err(self.fail(error)),
                    };
                    if self.drain == DrainPolicy::SpinYield {
                        std::thread::yield_now();
                    }
                }
            }

            // Hand the incumbent to the successor, wait for the whole ring
            // to arrive (the barrier action resets the active counter
            // before anyone is released), then adopt the predecessor's.
            if self.next.send(best).is_err() {
                return Err(WorkerFailure::Aborted);
            }
            if self.barrier.wait().is_err() {
                return Err(WorkerFailure::Aborted);
            }
            best = match self.prev.recv() {
                Ok(adopted) => adopted,
                Err(_) => return Err(WorkerFailure::Aborted),
            };
        }

        Ok(best)
    }

    /// One iterated-local-search step: clone, shake, improve, keep the
    /// clone only if it is strictly better under the objective.
    fn iteration(&mut self, best: S) -> Result<S, DynError> {
        let mut current = best.clone();
        self.config
            .shake
            .shake(&mut current, self.config.shake_strength, &mut self.rng)?;
        self.config.improver.improve(&mut current, &mut self.rng)?;
        if self.objective.is_better(current.score(), best.score()) {
            Ok(current)
        } else {
            Ok(best)
        }
    }

    /// Releases every sibling that may be blocked on the counter, the
    /// barrier or a channel, then reports the root cause.
    fn fail(&self, error: DynError) -> WorkerFailure {
        tracing::debug!(worker = self.index, %error, "ring worker failed, aborting run");
        self.active.poison();
        self.barrier.abort();
        WorkerFailure::Strategy(error)
    }
}
