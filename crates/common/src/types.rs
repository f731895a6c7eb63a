/// A candidate multiplier and its natural logarithm, fixed at table-build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupElement {
    pub k: f64,
    pub ln_k: f64,
}

impl LookupElement {
    /// Pairs `k` with `ln(k)`.
    pub fn new(k: f64) -> Self {
        LookupElement { k, ln_k: k.ln() }
    }
}

/// One reduction step of the invariant table.
///
/// Fields:
/// - `xj`: reduced value entering the step.
/// - `yj`: running log-sum before this step's subtraction.
/// - `k`, `ln_k`: multiplier chosen for this step and its logarithm.
/// - `kxj`: `k * xj`, the value after applying the multiplier.
/// - `ylnk`: `yj - ln_k`, the log-sum after this step.
///
/// The invariant carried from step to step is `ln(x) = yj + ln(xj)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvariantElement {
    pub xj: f64,
    pub yj: f64,
    pub k: f64,
    pub ln_k: f64,
    pub kxj: f64,
    pub ylnk: f64,
}

/// Why the reduction loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Two consecutive log-sums differed by less than the convergence threshold.
    Converged,
    /// The iteration cap was reached first.
    BudgetExhausted,
}

/// Output of the reduction engine: the ordered trace and how the loop ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub trace: Vec<InvariantElement>,
    pub termination: Termination,
}

/// Result of one full pipeline run for a single input.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub input: f64,
    pub value: f64,
    pub trace: Vec<InvariantElement>,
    pub termination: Termination,
}

impl Estimate {
    /// The record the estimate was derived from.
    pub fn last(&self) -> Option<&InvariantElement> {
        self.trace.last()
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Absolute distance to a reference logarithm, usually `input.ln()`.
    pub fn abs_error(&self, reference: f64) -> f64 {
        (self.value - reference).abs()
    }
}
