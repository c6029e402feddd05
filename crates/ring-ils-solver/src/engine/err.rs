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

use ring_ils_model::prelude::DynError;

/// Fatal failure of one ring-engine run. The engine has no per-worker
/// isolation: any of these aborts the whole run and is surfaced to the
/// caller, where the outer scheduler treats it as a task-level failure.
#[derive(Debug)]
pub enum EngineError {
    /// The engine was configured without any worker.
    NoWorkers,
    /// The engine was configured with zero rotation rounds.
    NoRounds,
    /// A worker's shake budget is not evenly divisible by
    /// `workers * rounds`. Rejected up front instead of silently
    /// truncating the leftover iterations.
    UnevenShakeBudget {
        worker: usize,
        total_shakes: u64,
        workers: usize,
        rounds: usize,
    },
    /// A constructor failed while building the initial solutions.
    Construction { worker: usize, source: DynError },
    /// A worker's shake or improver failed during the rotation rounds.
    Worker { worker: usize, source: DynError },
    /// The run was torn down without any worker reporting a cause.
    Aborted,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NoWorkers => write!(f, "ring engine has no configured workers"),
            EngineError::NoRounds => write!(f, "ring engine has zero rotation rounds"),
            EngineError::UnevenShakeBudget {
                worker,
                total_shakes,
                workers,
                rounds,
            } => write!(
                f,
                "worker {} has a shake budget of {} which is not divisible by {} workers x {} rounds",
                worker, total_shakes, workers, rounds
            ),
            EngineError::Construction { worker, source } => {
                write!(f, "worker {} failed to construct a solution: {}", worker, source)
            }
            EngineError::Worker { worker, source } => {
                write!(f, "worker {} failed during rotation: {}", worker, source)
            }
            EngineError::Aborted => write!(f, "ring engine run was aborted"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Construction { source, .. } | EngineError::Worker { source, .. } => {
                Some(&**source as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}
