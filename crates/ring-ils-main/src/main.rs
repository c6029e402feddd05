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

mod tsp;

use chrono::{DateTime, Utc};
use rand_chacha::ChaCha8Rng;
use ring_ils_model::prelude::{
    Algorithm, ExceptionHandler, FailureContext, Instance, Objective, Solution,
};
use ring_ils_solver::prelude::{
    ConcurrentExecutor, Experiment, ExecutorConfig, RingExchangeIls, WorkerConfig,
};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tsp::{
    NearestNeighborConstructor, SegmentReverseShake, TourValidator, TspInstance, TspSolution,
    TwoOptImprover,
};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

struct LoggingExceptionHandler;

impl ExceptionHandler<TspInstance, TspSolution> for LoggingExceptionHandler {
    fn handle(&self, context: &FailureContext<'_, TspInstance, TspSolution>) {
        tracing::error!(
            experiment = context.experiment,
            instance = context.instance.id(),
            algorithm = context.algorithm,
            repetition = context.repetition,
            error = %context.error,
            has_partial = context.partial.is_some(),
            "repetition failed"
        );
    }
}

#[derive(Serialize)]
struct RunReport {
    generated_at: DateTime<Utc>,
    experiment: String,
    records: Vec<ring_ils_solver::prelude::SummaryRecord>,
}

fn ring_configs(
    instance: &Arc<TspInstance>,
    workers: usize,
    rounds: usize,
    share: u64,
) -> Vec<WorkerConfig<TspInstance, TspSolution>> {
    (0..workers)
        .map(|k| {
            WorkerConfig::new(
                Box::new(NearestNeighborConstructor::new(Arc::clone(instance))),
                Box::new(SegmentReverseShake),
                Box::new(TwoOptImprover::new(8)),
                // Harder shakes on later ring positions.
                2 + 2 * k as u32,
                share * (workers * rounds) as u64,
            )
        })
        .collect()
}

fn main() {
    enable_tracing();

    let instance = Arc::new(TspInstance::random("random-60", 60, 2025));
    let objective = Objective::of_minimizing("tour-length");
    let rounds = 4;

    let sequential: Arc<dyn Algorithm<TspInstance, TspSolution, ChaCha8Rng>> = Arc::new(
        RingExchangeIls::new(
            objective.clone(),
            rounds,
            ring_configs(&instance, 1, rounds, 50),
        )
        .with_name("ils-sequential"),
    );
    let ring: Arc<dyn Algorithm<TspInstance, TspSolution, ChaCha8Rng>> = Arc::new(
        RingExchangeIls::new(
            objective.clone(),
            rounds,
            ring_configs(&instance, 4, rounds, 50),
        )
        .with_name("ils-ring-4"),
    );

    let experiment = Experiment::new("tsp-smoke")
        .with_algorithm(sequential)
        .with_algorithm(ring);

    let executor = ConcurrentExecutor::new(ExecutorConfig::default())
        .with_validator(Arc::new(TourValidator));
    let handler: Arc<dyn ExceptionHandler<TspInstance, TspSolution>> =
        Arc::new(LoggingExceptionHandler);

    let summaries = executor
        .execute(&experiment, &instance, 5, &handler)
        .expect("executor was shut down before the experiment ran");

    let mut records = Vec::new();
    for summary in &summaries {
        match summary.best(&objective) {
            Some(best) => tracing::info!(
                algorithm = summary.algorithm.as_str(),
                completed = summary.completed(),
                best_score = best.solution.score(),
                tour_cities = best.solution.tour().len(),
                "algorithm finished"
            ),
            None => tracing::warn!(
                algorithm = summary.algorithm.as_str(),
                "algorithm yielded no successful repetitions"
            ),
        }
        records.extend(summary.records());
    }

    let report = RunReport {
        generated_at: Utc::now(),
        experiment: experiment.name().to_string(),
        records,
    };
    let json = serde_json::to_string_pretty(&report).expect("report serialization failed");
    let path = "results.json";
    File::create(path)
        .and_then(|mut file| file.write_all(json.as_bytes()))
        .expect("failed to write results.json");
    tracing::info!(path, "exported run report");
}
