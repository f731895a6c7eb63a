use std::hint::black_box;
use std::time::Instant;

use nicelog_core::{TableLnEstimator, traits::LnEstimator};
use perf_bench::*;

fn main() {
    let inputs = generate_benchmark_inputs();
    let estimator = TableLnEstimator::default();

    let start_time = Instant::now();
    let mut checksum: f64 = 0.0;
    let mut max_error: f64 = 0.0;
    let mut failures = 0usize;

    // Every call rebuilds the trace; the table itself is shared.
    for x in inputs {
        match estimator.estimate(black_box(x)) {
            Ok(estimate) => {
                checksum += estimate.value;
                max_error = max_error.max(estimate.abs_error(x.ln()));
            }
            Err(_) => failures += 1,
        }
    }

    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum);

    println!("--- Table ln Benchmark Results ({} Inputs) ---", NUM_INPUTS);
    println!("Checksum: {:.10}", final_checksum);
    println!("Max abs error vs f64::ln: {:.3e}", max_error);
    println!("Failures: {}", failures);
    println!("Elapsed Time: {:?}", elapsed_time);
}
