use tokio::sync::mpsc::Sender;

use super::error::Error;

/// A batch of inputs whose logarithms are to be estimated.
pub type InputBatch = Vec<f64>;

/// Contract for any source that streams inputs into the evaluation pipeline.
///
/// Implementations own their data and consume themselves when run. The
/// bounds let the producer move them onto the Tokio runtime.
#[async_trait::async_trait]
pub trait InputStreamer: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<InputBatch>) -> Result<(), Error>;
}

/// Where the driver reads its inputs from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// A single literal input.
    Fixed(f64),
    /// A CSV file with an `x` column.
    Csv(String),
    /// Randomly sampled inputs.
    Sim,
}
