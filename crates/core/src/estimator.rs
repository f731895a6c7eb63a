use super::lookup::LookupTable;
use super::reducer::{ReductionParams, SearchMode, find_largest_k, reduce};
use super::traits::LnEstimator;
use common::{
    error::Error,
    numeric_kernel::residual,
    types::{Estimate, InvariantElement},
};

/// Derives the logarithm estimate from the last record of a trace.
///
/// `estimate = (last.yj - last.ln_k) - |1 - last.kxj|`
///
/// The residual term approximates `ln(last.kxj)` for a value just below 1.
/// `_x` is accepted for signature parity with the rest of the pipeline but
/// does not take part in the computation; the trace alone determines the result.
///
/// # Errors
/// Returns `Error::EmptyTrace` if `trace` has no records.
pub fn calculate_ln(_x: f64, trace: &[InvariantElement]) -> Result<f64, Error> {
    let last = trace.last().ok_or(Error::EmptyTrace)?;
    Ok((last.yj - last.ln_k) - residual(last.kxj))
}

/// Table-driven estimator: builds the lookup table once, then runs
/// reduction and estimation for each input.
#[derive(Debug, Clone, Default)]
pub struct TableLnEstimator {
    table: LookupTable,
    params: ReductionParams,
}

impl TableLnEstimator {
    pub fn new(params: ReductionParams) -> Self {
        Self {
            table: LookupTable::build(),
            params,
        }
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    pub fn params(&self) -> &ReductionParams {
        &self.params
    }

    /// Rejects inputs the table cannot reduce, then estimates.
    ///
    /// # Errors
    /// - `Error::NonFiniteInput` for NaN or infinite `x`.
    /// - `Error::NonPositiveInput` for `x <= 0`.
    /// - `Error::OutsideTableRange` when the division search finds no multiplier
    ///   (`x >= 256` for the standard table).
    /// - `Error::EmptyTrace` when the iteration budget is zero.
    pub fn estimate_checked(&self, x: f64) -> Result<Estimate, Error> {
        if !x.is_finite() {
            return Err(Error::NonFiniteInput(x));
        }
        if x <= 0.0 {
            return Err(Error::NonPositiveInput(x));
        }
        if find_largest_k(x, &self.table, SearchMode::Division) == 1.0 {
            return Err(Error::OutsideTableRange {
                input: x,
                bound: self.table.largest(),
            });
        }

        self.estimate(x)
    }
}

impl LnEstimator for TableLnEstimator {
    /// Unchecked path: domain errors flow through the arithmetic as values.
    fn estimate(&self, x: f64) -> Result<Estimate, Error> {
        let reduction = reduce(x, &self.table, &self.params);
        let value = calculate_ln(x, &reduction.trace)?;

        Ok(Estimate {
            input: x,
            value,
            trace: reduction.trace,
            termination: reduction.termination,
        })
    }
}
