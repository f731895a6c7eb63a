// ----------------------------
// Benchmark inputs
// ----------------------------

pub const NUM_INPUTS: usize = 100_000;

/// Lower end of the sweep; the upper end stays below the largest table multiplier.
pub const MIN_INPUT: f64 = 0.001;
pub const MAX_INPUT: f64 = 255.0;

/// Generates a deterministic sweep of inputs across the table range.
///
/// Inputs are spaced geometrically so small and large magnitudes get equal
/// weight, and varied by index so the compiler cannot fold the loop.
pub fn generate_benchmark_inputs() -> Vec<f64> {
    let ratio = (MAX_INPUT / MIN_INPUT).ln() / (NUM_INPUTS - 1) as f64;
    (0..NUM_INPUTS)
        .map(|i| MIN_INPUT * (ratio * i as f64).exp())
        .collect()
}
