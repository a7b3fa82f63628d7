pub mod dataset;
pub mod hourly;
pub mod monthly;
pub mod raw;
pub mod wind;

pub use dataset::CleanDataset;
pub use hourly::HourlyRecord;
pub use monthly::MonthlyRecord;
pub use raw::RawRecord;
pub use wind::WindDirection;
