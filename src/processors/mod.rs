pub mod combiner;
pub mod monthly_aggregator;
pub mod normalizer;
pub mod partitioner;
pub mod pipeline;

pub use combiner::{CombineConfig, DatasetCombiner, StationSelection};
pub use monthly_aggregator::MonthlyAggregator;
pub use normalizer::Normalizer;
pub use partitioner::StationPartitioner;
pub use pipeline::{CleaningReport, Pipeline};
