pub mod dataset_reader;
pub mod hourly_reader;

pub use dataset_reader::DatasetReader;
pub use hourly_reader::HourlyReader;
