use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::models::CleanDataset;
use crate::processors::{CombineConfig, DatasetCombiner, MonthlyAggregator, Normalizer, StationPartitioner};
use crate::readers::DatasetReader;
use crate::utils::progress::ProgressReporter;

/// Row and station counts gathered while cleaning, for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_clean: usize,
    pub stations: usize,
    pub monthly_records: usize,
    pub combined_rows: usize,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        format!(
            "Cleaning Summary:\n\
            - Hourly rows read: {}\n\
            - Rows dropped (incomplete): {} ({:.1}%)\n\
            - Rows cleaned: {}\n\
            - Stations: {}\n\
            - Monthly records: {}\n\
            - Combined reporting rows: {}",
            self.rows_read,
            self.rows_dropped,
            if self.rows_read > 0 {
                (self.rows_dropped as f64 / self.rows_read as f64) * 100.0
            } else {
                0.0
            },
            self.rows_clean,
            self.stations,
            self.monthly_records,
            self.combined_rows
        )
    }
}

/// Runs the full cleaning pipeline over a dataset directory:
/// load → normalize → partition → aggregate → combine.
///
/// Every stage materializes in memory and any failure aborts the run; the
/// resulting dataset is returned by value for callers to pass on explicitly.
pub struct Pipeline {
    max_workers: usize,
    use_mmap: bool,
    combine: CombineConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            max_workers: num_cpus::get(),
            use_mmap: false,
            combine: CombineConfig::default(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn with_combine_config(mut self, combine: CombineConfig) -> Self {
        self.combine = combine;
        self
    }

    pub fn run(
        &self,
        input_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(CleanDataset, CleaningReport)> {
        if let Some(p) = progress {
            p.set_message("Loading station files...");
        }
        let reader = DatasetReader::new()
            .with_max_workers(self.max_workers)
            .with_mmap(self.use_mmap);
        let raw = reader.read_dir(input_dir)?;
        let rows_read = raw.len();
        info!(rows = rows_read, "loaded raw records");

        if let Some(p) = progress {
            p.set_message("Cleaning hourly records...");
        }
        let hourly = Normalizer::new().normalize(&raw)?;
        drop(raw);
        let rows_clean = hourly.len();
        info!(
            kept = rows_clean,
            dropped = rows_read - rows_clean,
            "normalized hourly records"
        );

        if let Some(p) = progress {
            p.set_message("Aggregating monthly series...");
        }
        let partitions = StationPartitioner::new().partition(hourly)?;
        let aggregator = MonthlyAggregator::new();
        let mut by_station = HashMap::with_capacity(partitions.len());
        for (station, records) in &partitions {
            let months = aggregator.aggregate(records)?;
            by_station.insert(station.clone(), months);
        }
        let monthly_records = by_station.values().map(Vec::len).sum();

        if let Some(p) = progress {
            p.set_message("Combining reporting dataset...");
        }
        let combined = DatasetCombiner::new(self.combine.clone()).combine(&by_station)?;

        let report = CleaningReport {
            rows_read,
            rows_dropped: rows_read - rows_clean,
            rows_clean,
            stations: by_station.len(),
            monthly_records,
            combined_rows: combined.len(),
        };
        info!(
            stations = report.stations,
            months = report.monthly_records,
            "pipeline complete"
        );

        Ok((CleanDataset::new(by_station, combined), report))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

    #[test]
    fn test_end_to_end_single_station() -> Result<()> {
        let dir = TempDir::new()?;
        let mut file = std::fs::File::create(dir.path().join("PRSA_Data_Dingling.csv"))?;
        writeln!(file, "{}", HEADER)?;
        // Two complete March rows and one with a missing pollutant.
        writeln!(file, "1,2013,3,1,0,10,20,3,40,500,60,0,1020,-10,0.5,N,2,Dingling")?;
        writeln!(file, "2,2013,3,1,1,30,20,3,40,500,60,0,1020,-10,0.5,N,2,Dingling")?;
        writeln!(file, "3,2013,3,1,2,NA,20,3,40,500,60,0,1020,-10,0.5,N,2,Dingling")?;

        let pipeline = Pipeline::new()
            .with_max_workers(1)
            .with_combine_config(CombineConfig::all());
        let (dataset, report) = pipeline.run(dir.path(), None)?;

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.stations, 1);
        assert_eq!(report.monthly_records, 1);

        let months = dataset.station("Dingling").unwrap();
        assert_eq!(months.len(), 1);
        // The NA row contributes nothing to the mean.
        assert_eq!(months[0].pm25, 20.0);

        Ok(())
    }
}
