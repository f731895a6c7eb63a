use std::time::Duration;

use common::types::{Estimate, InvariantElement, Termination};

/// Formats one trace record as `xj - yj - k - ln_k - kxj - ylnk`.
pub fn format_step(element: &InvariantElement) -> String {
    format!(
        "{} - {} - {} - {} - {} - {}",
        element.xj, element.yj, element.k, element.ln_k, element.kxj, element.ylnk
    )
}

pub fn format_trace(trace: &[InvariantElement]) -> Vec<String> {
    trace.iter().map(format_step).collect()
}

/// One-line summary comparing the estimate with `f64::ln`.
pub fn format_summary(estimate: &Estimate, elapsed: Duration) -> String {
    let reference = estimate.input.ln();
    let termination = match estimate.termination {
        Termination::Converged => "converged",
        Termination::BudgetExhausted => "budget exhausted",
    };

    format!(
        "ln({}) ~ {:.10} (f64::ln = {:.10}, abs error = {:.3e}, steps = {}, {}, elapsed = {:?})",
        estimate.input,
        estimate.value,
        reference,
        estimate.abs_error(reference),
        estimate.trace.len(),
        termination,
        elapsed
    )
}
