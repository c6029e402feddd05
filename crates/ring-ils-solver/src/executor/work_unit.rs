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

use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{Algorithm, ExceptionHandler, Instance, Solution};
use std::sync::Arc;
use std::time::Duration;

/// The smallest independently schedulable task: one repetition of one
/// algorithm on one instance. Immutable once created; created by the
/// scheduler before dispatch, consumed exactly once.
pub struct WorkUnit<I, S>
where
    I: Instance,
    S: Solution,
{
    experiment: String,
    instance_id: String,
    algorithm: Arc<dyn Algorithm<I, S, ChaCha8Rng>>,
    repetition: usize,
    handler: Arc<dyn ExceptionHandler<I, S>>,
}

impl<I, S> WorkUnit<I, S>
where
    I: Instance,
    S: Solution,
{
    pub fn new(
        experiment: impl Into<String>,
        instance_id: impl Into<String>,
        algorithm: Arc<dyn Algorithm<I, S, ChaCha8Rng>>,
        repetition: usize,
        handler: Arc<dyn ExceptionHandler<I, S>>,
    ) -> Self {
        Self {
            experiment: experiment.into(),
            instance_id: instance_id.into(),
            algorithm,
            repetition,
            handler,
        }
    }

    #[inline]
    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    #[inline]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    #[inline]
    pub fn algorithm(&self) -> &Arc<dyn Algorithm<I, S, ChaCha8Rng>> {
        &self.algorithm
    }

    #[inline]
    pub fn repetition(&self) -> usize {
        self.repetition
    }

    #[inline]
    pub fn handler(&self) -> &Arc<dyn ExceptionHandler<I, S>> {
        &self.handler
    }
}

/// Outcome of one successfully completed work unit.
#[derive(Debug, Clone)]
pub struct WorkUnitResult<S>
where
    S: Solution,
{
    pub repetition: usize,
    pub solution: S,
    /// Wall-clock duration of the whole algorithm call.
    pub elapsed: Duration,
    /// Duration from task start to the solution's last improving mutation.
    pub time_to_target: Duration,
}
