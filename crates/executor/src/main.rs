pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod evaluator;
pub mod fixed_streamer;
pub mod producer;
pub mod report;
pub mod simulator;
pub mod types;

use std::env;
use tokio::sync::{mpsc, mpsc::Sender};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use csv_streamer::CsvStreamer;
use error::Error;
use evaluator::Evaluator;
use fixed_streamer::FixedStreamer;
use nicelog_core::TableLnEstimator;
use producer::Producer;
use simulator::SimulatorStreamer;
use types::{DataSource, InputBatch};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = config::load_config()?;
    let args: Vec<String> = env::args().collect();
    let source = parse_args(&args, config.driver.input)?;

    let estimator = TableLnEstimator::new(config.reduction.clone().into());
    let (sender, receiver) = mpsc::channel::<InputBatch>(config.driver.buffer_size.max(1));

    let producer_handle = spawn_producer(&source, sender, &config);
    let evaluator = Evaluator::new(
        estimator,
        receiver,
        config.driver.checked,
        config.driver.print_trace,
    );
    let evaluator_handle = tokio::spawn(evaluator.process_inputs());

    let (producer_result, evaluator_result) = tokio::join!(producer_handle, evaluator_handle);
    producer_result??;
    let summary = evaluator_result??;

    info!(
        evaluated = summary.evaluated,
        rejected = summary.rejected,
        total_elapsed = ?summary.total_elapsed,
        "Pipeline shut down."
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse command-line arguments to determine the data source.
///
/// `fixed` without a value falls back to `default_input`.
fn parse_args(args: &[String], default_input: f64) -> Result<DataSource, Error> {
    let program = args.first().map(String::as_str).unwrap_or("executor");
    let usage = || {
        Error::Usage(format!(
            "Usage: {} <FIXED|CSV|SIM> [value|path_to_csv]\n  - FIXED: estimate ln of one value (default {})\n  - CSV: read inputs from the `x` column of a CSV file\n  - SIM: estimate ln of randomly sampled inputs",
            program, default_input
        ))
    };

    let mode = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "fixed".to_string());

    match mode.as_str() {
        "fixed" => match args.get(2) {
            Some(value) => value
                .parse::<f64>()
                .map(DataSource::Fixed)
                .map_err(|_| usage()),
            None => Ok(DataSource::Fixed(default_input)),
        },
        "csv" => args
            .get(2)
            .map(|path| DataSource::Csv(path.clone()))
            .ok_or_else(usage),
        "sim" => Ok(DataSource::Sim),
        _ => Err(usage()),
    }
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<InputBatch>,
    config: &config::Config,
) -> JoinHandle<Result<(), Error>> {
    match source {
        DataSource::Fixed(x) => {
            info!(input = x, "Starting FixedStreamer producer task...");
            Producer::new(FixedStreamer::new(*x)).spawn(sender)
        }
        DataSource::Csv(path) => {
            info!(%path, "Starting CsvStreamer producer task...");
            let streamer = CsvStreamer::new(path.clone(), config.driver.batch_size);
            Producer::new(streamer).spawn(sender)
        }
        DataSource::Sim => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer =
                SimulatorStreamer::new(config.simulator.clone(), config.driver.batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}
