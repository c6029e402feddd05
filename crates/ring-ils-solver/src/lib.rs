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

//! Concurrent execution core: a bounded work-unit scheduler with isolated
//! per-unit failure handling, and a ring-exchange iterated local search
//! engine whose workers synchronize through single-slot hand-off channels,
//! a shared active counter and a resettable cyclic barrier.

pub mod cancel;
pub mod engine;
pub mod executor;
pub mod pool;
pub mod rng;

pub mod prelude {
    pub use crate::cancel::CancellationToken;
    pub use crate::engine::err::EngineError;
    pub use crate::engine::ils::{DrainPolicy, RingExchangeIls, WorkerConfig};
    pub use crate::executor::results::{AlgorithmSummary, SummaryRecord};
    pub use crate::executor::scheduler::{ConcurrentExecutor, Experiment, ExecutorConfig};
    pub use crate::executor::work_unit::{WorkUnit, WorkUnitResult};
    pub use crate::pool::{FixedThreadPool, PoolClosedError};
}
