use common::{error::Error, types::Estimate};

/// Trait for natural-logarithm estimators that expose their reduction trace.
pub trait LnEstimator {
    /// Estimates `ln(x)`.
    ///
    /// Returns `Ok(estimate)` with the value and the trace it was derived from,
    /// or `Err(e)` when no estimate can be formed.
    fn estimate(&self, x: f64) -> Result<Estimate, Error>;
}
