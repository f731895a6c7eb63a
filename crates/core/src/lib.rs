pub mod estimator;
pub mod lookup;
pub mod reducer;
pub mod traits;

pub use estimator::TableLnEstimator;
pub use lookup::LookupTable;
pub use reducer::{ReductionParams, SearchMode};
