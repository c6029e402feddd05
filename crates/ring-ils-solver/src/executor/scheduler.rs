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

//! Work-unit scheduler: dispatches independent (instance, algorithm,
//! repetition) triples onto a bounded thread pool with isolated per-unit
//! failure handling.

use crate::cancel::CancellationToken;
use crate::executor::results::{AlgorithmSummary, RunningResults};
use crate::executor::work_unit::{WorkUnit, WorkUnitResult};
use crate::pool::{FixedThreadPool, PoolClosedError};
use crate::rng::repetition_rng;
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{
    Algorithm, ExceptionHandler, FailureContext, Instance, InstanceManager, Solution,
    SolutionValidator,
};
use std::sync::Arc;
use std::sync::mpsc::channel;
use std::time::Instant;

/// An ordered list of algorithms to run under one experiment name.
pub struct Experiment<I, S>
where
    I: Instance,
    S: Solution,
{
    name: String,
    algorithms: Vec<Arc<dyn Algorithm<I, S, ChaCha8Rng>>>,
}

impl<I, S> Experiment<I, S>
where
    I: Instance,
    S: Solution,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            algorithms: Vec::new(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Arc<dyn Algorithm<I, S, ChaCha8Rng>>) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn algorithms(&self) -> &[Arc<dyn Algorithm<I, S, ChaCha8Rng>>] {
        &self.algorithms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutorConfig {
    pub n_workers: usize,
}

impl Default for ExecutorConfig {
    /// Half the available hardware parallelism, at least one worker.
    fn default() -> Self {
        Self {
            n_workers: std::thread::available_parallelism()
                .map(|n| n.get() / 2)
                .unwrap_or(1)
                .max(1),
        }
    }
}

/// Runs work units on a fixed-size pool. Repetitions of one algorithm are
/// fully concurrent with no mutual ordering; algorithms are processed one
/// at a time with a full join in between, so per-algorithm statistics
/// never interleave.
pub struct ConcurrentExecutor<I, S>
where
    I: Instance,
    S: Solution,
{
    pool: FixedThreadPool,
    validator: Option<Arc<dyn SolutionValidator<I, S>>>,
    cancellation: CancellationToken,
}

impl<I, S> ConcurrentExecutor<I, S>
where
    I: Instance,
    S: Solution,
{
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            pool: FixedThreadPool::new(config.n_workers),
            validator: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn SolutionValidator<I, S>>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Runs `repetitions` work units for every algorithm of the experiment
    /// against one instance and returns one summary per algorithm, in
    /// experiment order. Failed or skipped units are absent from their
    /// summary; there are no retries.
    pub fn execute(
        &self,
        experiment: &Experiment<I, S>,
        instance: &Arc<I>,
        repetitions: usize,
        handler: &Arc<dyn ExceptionHandler<I, S>>,
    ) -> Result<Vec<AlgorithmSummary<S>>, PoolClosedError> {
        if self.validator.is_none() {
            tracing::warn!("no solution validator configured, solution correctness will not be checked");
        }
        tracing::info!(
            experiment = experiment.name(),
            instance = instance.id(),
            repetitions,
            "submitting work units"
        );

        let mut summaries = Vec::with_capacity(experiment.algorithms().len());
        for algorithm in experiment.algorithms() {
            let results = Arc::new(RunningResults::<S>::new(
                algorithm.name(),
                instance.id(),
                repetitions,
            ));
            let (done_tx, done_rx) = channel::<()>();

            for repetition in 0..repetitions {
                let unit = WorkUnit::new(
                    experiment.name(),
                    instance.id(),
                    Arc::clone(algorithm),
                    repetition,
                    Arc::clone(handler),
                );
                let instance = Arc::clone(instance);
                let results = Arc::clone(&results);
                let validator = self.validator.clone();
                let cancellation = self.cancellation.clone();
                let done = done_tx.clone();

                self.pool.submit(move || {
                    if let Some(result) = run_work_unit(&unit, &instance, validator.as_deref(), &cancellation)
                    {
                        results.add(result);
                    }
                    let _ = done.send(());
                })?;
            }
            drop(done_tx);

            // Per-algorithm barrier: the channel closes once every unit has
            // run (or unwound), including those that panicked.
            tracing::debug!(
                instance = instance.id(),
                algorithm = algorithm.name(),
                "waiting for all repetitions"
            );
            while done_rx.recv().is_ok() {}

            summaries.push(results.finish());
        }
        Ok(summaries)
    }

    /// Resolves instance paths through the manager and runs the experiment
    /// against each instance in order. An instance that fails to load is
    /// logged and skipped; it never aborts sibling instances.
    pub fn execute_experiment(
        &self,
        experiment: &Experiment<I, S>,
        instance_paths: &[String],
        manager: &dyn InstanceManager<I>,
        repetitions: usize,
        handler: &Arc<dyn ExceptionHandler<I, S>>,
    ) -> Result<Vec<AlgorithmSummary<S>>, PoolClosedError> {
        let mut all = Vec::new();
        for path in instance_paths {
            match manager.instance(path) {
                Ok(instance) => {
                    all.extend(self.execute(experiment, &instance, repetitions, handler)?);
                }
                Err(error) => {
                    tracing::error!(%path, %error, "failed to load instance, skipping");
                }
            }
        }
        Ok(all)
    }

    /// Stops accepting new work units; in-flight and queued units run to
    /// completion.
    pub fn shutdown(&mut self) {
        tracing::info!("shutting down executor");
        self.pool.shutdown();
    }
}

/// Executes one work unit in isolation. Returns `None` when the unit was
/// skipped, failed or was rejected by validation; failures are routed to
/// the unit's exception handler with full context.
fn run_work_unit<I, S>(
    unit: &WorkUnit<I, S>,
    instance: &Arc<I>,
    validator: Option<&dyn SolutionValidator<I, S>>,
    cancellation: &CancellationToken,
) -> Option<WorkUnitResult<S>>
where
    I: Instance,
    S: Solution,
{
    if cancellation.is_cancelled() {
        tracing::debug!(
            experiment = unit.experiment(),
            repetition = unit.repetition(),
            "cancellation requested, skipping work unit"
        );
        return None;
    }

    // Reproducibility: the generator depends only on the repetition index,
    // never on scheduling order.
    let mut rng = repetition_rng(unit.repetition());
    let start = Instant::now();
    let outcome = unit.algorithm().run(instance, &mut rng);
    let elapsed = start.elapsed();

    let solution = match outcome {
        Ok(solution) => solution,
        Err(error) => {
            report_failure(unit, instance, &error, None);
            return None;
        }
    };

    // Post-conditions: a positive time-to-target, then the user validator.
    let time_to_target = match solution.last_modified().checked_duration_since(start) {
        Some(duration) => duration,
        None => {
            let error = "solution reports an improvement time before the task started".into();
            report_failure(unit, instance, &error, Some(&solution));
            return None;
        }
    };
    if let Some(validator) = validator
        && let Err(error) = validator.validate(instance, &solution)
    {
        report_failure(unit, instance, &error, Some(&solution));
        return None;
    }

    tracing::info!(
        "{}.\tT(s): {:.3}\tTTB(s): {:.3}\tscore: {:.3}",
        unit.repetition() + 1,
        elapsed.as_secs_f64(),
        time_to_target.as_secs_f64(),
        solution.score()
    );
    Some(WorkUnitResult {
        repetition: unit.repetition(),
        solution,
        elapsed,
        time_to_target,
    })
}

fn report_failure<I, S>(
    unit: &WorkUnit<I, S>,
    instance: &Arc<I>,
    error: &ring_ils_model::prelude::DynError,
    partial: Option<&S>,
) where
    I: Instance,
    S: Solution,
{
    tracing::error!(
        experiment = unit.experiment(),
        instance = unit.instance_id(),
        algorithm = unit.algorithm().name(),
        repetition = unit.repetition(),
        %error,
        "work unit failed"
    );
    unit.handler().handle(&FailureContext {
        experiment: unit.experiment(),
        instance,
        algorithm: unit.algorithm().name(),
        repetition: unit.repetition(),
        error,
        partial,
    });
}
