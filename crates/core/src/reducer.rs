use super::lookup::{LookupTable, NUM_ENTRIES};
use common::numeric_kernel::{has_converged, reduction_step};
use common::types::{InvariantElement, Reduction, Termination};
use tracing::{debug, trace};

/// Stop once two consecutive log-sums differ by less than this (absolute).
pub const CONVERGENCE_THRESHOLD: f64 = 1e-2;

/// Hard cap on reduction steps; one pass over the table.
pub const MAX_ITERATIONS: usize = NUM_ENTRIES;

/// Threshold test used by [`find_largest_k`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// First `k` with `x / k < 1`. Used once to bring the input below 1.
    Division,
    /// First `k` with `x * k < 1`. Used on every reduction step.
    Multiplication,
}

impl SearchMode {
    fn accepts(self, x: f64, k: f64) -> bool {
        match self {
            SearchMode::Division => x / k < 1.0,
            SearchMode::Multiplication => x * k < 1.0,
        }
    }
}

/// Termination policy of the reduction loop.
///
/// Together the two values bound both precision and running time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionParams {
    pub convergence_threshold: f64,
    pub max_iterations: usize,
}

impl Default for ReductionParams {
    fn default() -> Self {
        Self {
            convergence_threshold: CONVERGENCE_THRESHOLD,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// Returns the first multiplier in table order that passes the `mode` test,
/// or `1.0` when none does.
///
/// This is a greedy first-match scan, not a nearest-match search: with the
/// table ordered coarse to fine it picks the coarsest reduction that does not
/// overshoot 1.
pub fn find_largest_k(x: f64, table: &LookupTable, mode: SearchMode) -> f64 {
    table
        .iter()
        .find(|element| mode.accepts(x, element.k))
        .map_or(1.0, |element| element.k)
}

/// Runs the reduction loop and reports how it ended.
///
/// The state starts at `xj = x / k0`, `yj = ln(k0)` where `k0` is the division
/// search result, then each step multiplies `xj` by the multiplication search
/// result and subtracts its log from `yj`. The loop stops after the step whose
/// log-sum moved by less than `params.convergence_threshold`, or after
/// `params.max_iterations` steps.
///
/// There is no input validation here: NaN stays NaN, and zero or negative
/// inputs run the full budget and produce meaningless values.
pub fn reduce(x: f64, table: &LookupTable, params: &ReductionParams) -> Reduction {
    let k0 = find_largest_k(x, table, SearchMode::Division);
    let mut xj = x / k0;
    let mut yj = k0.ln();
    let mut previous_yj = yj;

    // The budget is caller-supplied and may be far larger than any real trace.
    let mut trace: Vec<InvariantElement> =
        Vec::with_capacity(params.max_iterations.min(NUM_ENTRIES));
    let mut termination = Termination::BudgetExhausted;

    for step in 0..params.max_iterations {
        let k = find_largest_k(xj, table, SearchMode::Multiplication);
        let element = reduction_step(xj, yj, k);
        trace.push(element);

        trace!(
            step,
            xj = element.xj,
            yj = element.yj,
            k = element.k,
            kxj = element.kxj,
            "reduction step"
        );

        xj = element.kxj;
        yj = element.ylnk;

        if has_converged(previous_yj, yj, params.convergence_threshold) {
            termination = Termination::Converged;
            break;
        }
        previous_yj = yj;
    }

    debug!(x, k0, steps = trace.len(), ?termination, "reduction finished");

    Reduction { trace, termination }
}

/// Builds the invariant table (trace) for `x` with the default policy.
pub fn create_invariant_table(x: f64, table: &LookupTable) -> Vec<InvariantElement> {
    reduce(x, table, &ReductionParams::default()).trace
}
