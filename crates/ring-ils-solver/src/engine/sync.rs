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

//! Round synchronization primitives for the ring engine.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of workers still inside their fixed per-round share.
///
/// Reset to the worker count at every round boundary by the barrier's
/// completion action; decremented exactly once per worker per round.
/// Workers poll it in the drain loop, so reads must never be torn or
/// stale beyond the atomic ordering guarantees.
#[derive(Debug)]
pub struct ActiveCounter {
    active: AtomicUsize,
}

impl ActiveCounter {
    #[inline]
    pub fn new(workers: usize) -> Self {
        Self {
            active: AtomicUsize::new(workers),
        }
    }

    #[inline]
    pub fn reset(&self, workers: usize) {
        self.active.store(workers, Ordering::Release);
    }

    /// Marks the calling worker's fixed share as finished for this round.
    /// Saturates at zero: a decrement racing a [`Self::poison`] must not
    /// wrap the counter back to nonzero.
    #[inline]
    pub fn finish_share(&self) {
        let _ = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| v.checked_sub(1));
    }

    /// True while any worker is still inside its fixed share.
    #[inline]
    pub fn busy(&self) -> bool {
        self.active.load(Ordering::Acquire) != 0
    }

    /// Forces the counter to zero so drain loops exit during an abort.
    #[inline]
    pub fn poison(&self) {
        self.active.store(0, Ordering::Release);
    }
}

/// Returned by [`CyclicBarrier::wait`] once the barrier has been aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrokenBarrierError;

impl std::fmt::Display for BrokenBarrierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cyclic barrier was broken while waiting")
    }
}

impl std::error::Error for BrokenBarrierError {}

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    broken: bool,
}

/// Reusable count-down-and-wait barrier with a completion action.
///
/// The action runs exactly once per generation, on the thread that trips
/// the barrier, while the barrier lock is held: no waiter of that
/// generation is released before the action has finished. [`Self::abort`]
/// breaks the barrier permanently, waking all current and future waiters
/// with [`BrokenBarrierError`].
pub struct CyclicBarrier<'a> {
    parties: usize,
    state: Mutex<BarrierState>,
    condvar: Condvar,
    action: Option<Box<dyn Fn() + Send + Sync + 'a>>,
}

impl<'a> CyclicBarrier<'a> {
    pub fn new(parties: usize) -> Self {
        Self::build(parties, None)
    }

    pub fn with_action(parties: usize, action: impl Fn() + Send + Sync + 'a) -> Self {
        Self::build(parties, Some(Box::new(action)))
    }

    fn build(parties: usize, action: Option<Box<dyn Fn() + Send + Sync + 'a>>) -> Self {
        debug_assert!(parties > 0, "a barrier needs at least one party");
        Self {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
                broken: false,
            }),
            condvar: Condvar::new(),
            action,
        }
    }

    #[inline]
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Blocks until all parties have arrived. Returns `Ok(true)` on the
    /// thread that tripped the barrier, `Ok(false)` on every other one.
    pub fn wait(&self) -> Result<bool, BrokenBarrierError> {
        let mut state = self.state.lock();
        if state.broken {
            return Err(BrokenBarrierError);
        }

        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            if let Some(action) = &self.action {
                action();
            }
            self.condvar.notify_all();
            return Ok(true);
        }

        let generation = state.generation;
        while state.generation == generation && !state.broken {
            self.condvar.wait(&mut state);
        }
        if state.broken {
            Err(BrokenBarrierError)
        } else {
            Ok(false)
        }
    }

    /// Permanently breaks the barrier and wakes every waiter.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        state.broken = true;
        self.condvar.notify_all();
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.state.lock().broken
    }
}

impl std::fmt::Debug for CyclicBarrier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CyclicBarrier")
            .field("parties", &self.parties)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
