use super::types::InvariantElement;

/// Applies one multiplier to the working state and records the step.
///
/// `yj` is the log-sum before subtraction; the returned record carries both
/// the entering state and the state after the step (`kxj`, `ylnk`).
pub fn reduction_step(xj: f64, yj: f64, k: f64) -> InvariantElement {
    let ln_k = k.ln();
    InvariantElement {
        xj,
        yj,
        k,
        ln_k,
        kxj: k * xj,
        ylnk: yj - ln_k,
    }
}

/// Absolute-difference gate between consecutive log-sums.
pub fn has_converged(previous_yj: f64, yj: f64, threshold: f64) -> bool {
    (previous_yj - yj).abs() < threshold
}

/// Distance of the final reduced value from 1.
///
/// For `kxj` just below 1, `ln(kxj) ~ -(1 - kxj)`, so subtracting this term
/// stands in for the logarithm of the part that was never reduced.
pub fn residual(kxj: f64) -> f64 {
    (1.0 - kxj).abs()
}
