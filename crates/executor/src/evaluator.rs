use std::time::{Duration, Instant};
use tokio::sync::mpsc::Receiver;
use tracing::{info, warn};

use super::error::Error;
use super::report::{format_summary, format_trace};
use super::types::InputBatch;
use common::types::Estimate;
use nicelog_core::{TableLnEstimator, traits::LnEstimator};

/// Aggregate outcome of an evaluation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationSummary {
    pub evaluated: usize,
    pub rejected: usize,
    pub unconverged: usize,
    pub max_abs_error: f64,
    pub total_elapsed: Duration,
}

impl EvaluationSummary {
    fn record(&mut self, estimate: &Estimate, elapsed: Duration) {
        self.evaluated += 1;
        if !estimate.converged() {
            self.unconverged += 1;
        }
        // NaN errors from unchecked domain inputs are not folded into the max.
        let error = estimate.abs_error(estimate.input.ln());
        if error > self.max_abs_error {
            self.max_abs_error = error;
        }
        self.total_elapsed += elapsed;
    }
}

/// Async consumer that estimates ln for every received input.
///
/// Each estimator call is timed on its own. Rejected inputs are logged and
/// counted; the run continues.
pub struct Evaluator {
    estimator: TableLnEstimator,
    receiver: Receiver<InputBatch>,
    checked: bool,
    print_trace: bool,
}

impl Evaluator {
    pub fn new(
        estimator: TableLnEstimator,
        receiver: Receiver<InputBatch>,
        checked: bool,
        print_trace: bool,
    ) -> Self {
        Self {
            estimator,
            receiver,
            checked,
            print_trace,
        }
    }

    fn evaluate(&self, x: f64) -> Result<(Estimate, Duration), Error> {
        // Times the whole estimate: validation, reduction and `calculate_ln`.
        let start = Instant::now();
        let estimate = if self.checked {
            self.estimator.estimate_checked(x)?
        } else {
            self.estimator.estimate(x)?
        };
        Ok((estimate, start.elapsed()))
    }

    /// Runs until the producer side of the channel closes.
    pub async fn process_inputs(mut self) -> Result<EvaluationSummary, Error> {
        info!(checked = self.checked, "Evaluator ready.");

        let mut summary = EvaluationSummary::default();

        while let Some(batch) = self.receiver.recv().await {
            for x in batch {
                match self.evaluate(x) {
                    Ok((estimate, elapsed)) => {
                        if self.print_trace {
                            for line in format_trace(&estimate.trace) {
                                println!("{}", line);
                            }
                        }
                        println!("{}", format_summary(&estimate, elapsed));
                        summary.record(&estimate, elapsed);
                    }
                    Err(e) => {
                        warn!("Evaluator: input {} rejected: {}. Continuing.", x, e);
                        summary.rejected += 1;
                    }
                }
            }
        }

        info!(
            evaluated = summary.evaluated,
            rejected = summary.rejected,
            unconverged = summary.unconverged,
            max_abs_error = summary.max_abs_error,
            "Input stream closed, evaluator finished."
        );
        Ok(summary)
    }
}
