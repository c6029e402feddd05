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

//! Single-slot hand-off channels arranged in a directed ring.
//!
//! Channel `k` connects worker `k`'s output to worker `(k + 1) % n`'s
//! input. The round protocol guarantees exactly one push and one pop per
//! channel per round, with the push happening-before the paired pop; the
//! one-slot capacity means a push never blocks and a pop blocks only
//! until its predecessor has pushed.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

/// The ring neighbor dropped its endpoint before completing the hand-off.
/// Only observed while a run is being aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingDisconnectedError;

impl std::fmt::Display for RingDisconnectedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ring neighbor disconnected before completing the hand-off")
    }
}

impl std::error::Error for RingDisconnectedError {}

/// Sending half of the hand-off channel to the successor worker.
#[derive(Debug)]
pub struct RingSender<S> {
    inner: SyncSender<S>,
}

impl<S: Send> RingSender<S> {
    /// Hands the solution to the successor. Ownership moves with the call.
    #[inline]
    pub fn send(&self, solution: S) -> Result<(), RingDisconnectedError> {
        self.inner.send(solution).map_err(|_| RingDisconnectedError)
    }
}

/// Receiving half of the hand-off channel from the predecessor worker.
#[derive(Debug)]
pub struct RingReceiver<S> {
    inner: Receiver<S>,
}

impl<S: Send> RingReceiver<S> {
    /// Blocks until the predecessor has pushed this round's solution.
    #[inline]
    pub fn recv(&self) -> Result<S, RingDisconnectedError> {
        self.inner.recv().map_err(|_| RingDisconnectedError)
    }
}

/// Builds the ring wiring: entry `k` of the returned vector holds worker
/// `k`'s sender towards `(k + 1) % n` and its receiver from
/// `(k + n - 1) % n`. With a single worker the ring is a self loop.
pub fn ring_channels<S: Send>(workers: usize) -> Vec<(RingSender<S>, RingReceiver<S>)> {
    let mut senders = Vec::with_capacity(workers);
    let mut receivers = Vec::with_capacity(workers);
    for _ in 0..workers {
        let (tx, rx) = sync_channel(1);
        senders.push(RingSender { inner: tx });
        receivers.push(RingReceiver { inner: rx });
    }
    // receivers[k] belongs to channel k, whose consumer is worker k + 1.
    receivers.rotate_right(1);
    senders.into_iter().zip(receivers).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_solution_travels_to_the_successor() {
        let ring = ring_channels::<usize>(3);
        for (k, (sender, _)) in ring.iter().enumerate() {
            sender.send(k).unwrap();
        }
        for (k, (_, receiver)) in ring.iter().enumerate() {
            let predecessor = (k + 2) % 3;
            assert_eq!(receiver.recv().unwrap(), predecessor);
        }
    }

    #[test]
    fn test_single_worker_ring_is_a_self_loop() {
        let ring = ring_channels::<&str>(1);
        let (sender, receiver) = &ring[0];
        sender.send("mine").unwrap();
        assert_eq!(receiver.recv().unwrap(), "mine");
    }

    #[test]
    fn test_one_push_one_pop_per_round_over_many_rounds() {
        let ring = ring_channels::<u32>(4);
        for round in 0..10 {
            for (sender, _) in &ring {
                sender.send(round).unwrap();
            }
            for (_, receiver) in &ring {
                assert_eq!(receiver.recv().unwrap(), round);
            }
        }
        // Channels are empty between rounds: a pop now would block, so a
        // sneaked extra push is the only way to observe a value here.
        for (sender, _) in &ring {
            sender.send(99).unwrap();
        }
        for (_, receiver) in &ring {
            assert_eq!(receiver.recv().unwrap(), 99);
        }
    }

    #[test]
    fn test_pop_blocks_until_the_predecessor_pushes() {
        let mut ring = ring_channels::<u8>(2);
        let (_, receiver) = ring.pop().unwrap(); // worker 1's receiver (from worker 0)
        let (sender, _) = ring.pop().unwrap(); // worker 0's sender (towards worker 1)
        std::thread::scope(|scope| {
            let waiter = scope.spawn(move || receiver.recv().unwrap());
            std::thread::sleep(Duration::from_millis(50));
            sender.send(7).unwrap();
            assert_eq!(waiter.join().unwrap(), 7);
        });
    }

    #[test]
    fn test_dropped_neighbor_surfaces_as_disconnect() {
        let mut ring = ring_channels::<u8>(2);
        let (_, receiver) = ring.pop().unwrap();
        drop(ring); // drops worker 0 and its sender
        assert_eq!(receiver.recv(), Err(RingDisconnectedError));
    }
}
