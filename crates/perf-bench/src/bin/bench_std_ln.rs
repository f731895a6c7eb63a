use std::hint::black_box;
use std::time::Instant;

use perf_bench::*;

fn main() {
    let inputs = generate_benchmark_inputs();

    let start_time = Instant::now();
    let mut checksum: f64 = 0.0;

    for x in inputs {
        checksum += black_box(x).ln();
    }

    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum);

    println!("--- f64::ln Benchmark Results ({} Inputs) ---", NUM_INPUTS);
    println!("Checksum: {:.10}", final_checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
