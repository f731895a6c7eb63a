use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The input is zero or negative, so it has no real logarithm.
    NonPositiveInput(f64),

    /// The input is NaN or infinite.
    NonFiniteInput(f64),

    /// The input is at or above the largest table multiplier, so the initial
    /// division search finds no entry and the reduction degenerates.
    OutsideTableRange { input: f64, bound: f64 },

    /// The estimator was handed a trace without any reduction step.
    EmptyTrace,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NonPositiveInput(x) => {
                write!(f, "Input {} is not positive; ln is undefined.", x)
            }

            Error::NonFiniteInput(x) => write!(f, "Input {} is not a finite number.", x),

            Error::OutsideTableRange { input, bound } => write!(
                f,
                "Input {} is outside the range covered by the lookup table (must be < {}).",
                input, bound
            ),

            Error::EmptyTrace => write!(f, "Cannot estimate ln from an empty reduction trace."),
        }
    }
}

impl std::error::Error for Error {}
