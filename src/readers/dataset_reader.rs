use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::RawRecord;
use crate::readers::HourlyReader;

/// Loads a whole PRSA dataset directory into one unified record sequence.
///
/// Files are read in parallel (order across files is unspecified by the data
/// contract; order within a file is preserved). A single unreadable or
/// malformed file fails the whole load.
pub struct DatasetReader {
    max_workers: usize,
    use_mmap: bool,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            max_workers: num_cpus::get(),
            use_mmap: false,
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read every CSV file under `dir` and concatenate the records.
    pub fn read_dir(&self, dir: &Path) -> Result<Vec<RawRecord>> {
        let files = self.find_csv_files(dir)?;
        if files.is_empty() {
            return Err(ProcessingError::MissingData(format!(
                "No CSV files found in {}",
                dir.display()
            )));
        }
        debug!(files = files.len(), "loading station files");

        let use_mmap = self.use_mmap;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(format!("Failed to build read pool: {}", e)))?;

        let per_file: Vec<Vec<RawRecord>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| HourlyReader::with_mmap(use_mmap).read_file(path))
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(per_file.into_iter().flatten().collect())
    }

    /// Enumerate the CSV files in the dataset directory, sorted by name for
    /// stable logging.
    fn find_csv_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            {
                files.push(path);
            }
        }
        files.sort_unstable();
        Ok(files)
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}
