mod blob;
mod estimate;
mod statistics;

pub use blob::ExtensionStats;
pub use estimate::{EstimationComparison, EstimationMethod, EstimationResult};
pub use statistics::{FileInformation, GrowthStatistics, YearlySeries};
