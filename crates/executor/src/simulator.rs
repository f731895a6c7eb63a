use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;
use tokio::time::{self, Duration};
use tracing::{debug, info};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{InputBatch, InputStreamer};

/// Produces uniformly sampled inputs for accuracy sweeps.
///
/// Sends `samples` inputs drawn from `[min_input, max_input)` in batches of
/// `batch_size`, one batch per tick, then finishes.
pub struct SimulatorStreamer {
    pub samples: usize,
    pub min_input: f64,
    pub max_input: f64,
    pub batch_size: usize,
    pub interval_ms: u64,
    rng: SmallRng,
}

impl SimulatorStreamer {
    pub fn new(config: SimulatorConfig, batch_size: usize) -> Self {
        SimulatorStreamer {
            samples: config.samples,
            min_input: config.min_input,
            max_input: config.max_input,
            batch_size: batch_size.max(1),
            interval_ms: config.interval_ms.max(1),
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Fixes the random sequence, for reproducible sweeps.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
}

#[async_trait]
impl InputStreamer for SimulatorStreamer {
    /// Backpressure comes from awaiting `sender.send()`. Returns an error if
    /// the range is unusable or the receiver is dropped.
    async fn run_stream(mut self, sender: Sender<InputBatch>) -> Result<(), Error> {
        if !(self.min_input > 0.0
            && self.min_input < self.max_input
            && self.max_input.is_finite())
        {
            return Err(Error::InvalidRange {
                min: self.min_input,
                max: self.max_input,
            });
        }

        let mut interval = time::interval(Duration::from_millis(self.interval_ms));
        let input_range = self.min_input..self.max_input;
        let mut remaining = self.samples;

        while remaining > 0 {
            interval.tick().await;

            let size = remaining.min(self.batch_size);
            let batch: InputBatch = (0..size)
                .map(|_| self.rng.random_range(input_range.clone()))
                .collect();

            debug!(size, "Simulator sent batch");
            if sender.send(batch).await.is_err() {
                info!("Simulator shutting down: evaluator receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
            remaining -= size;
        }

        info!(samples = self.samples, "Simulator finished");
        Ok(())
    }
}
