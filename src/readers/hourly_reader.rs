use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::error::Result;
use crate::models::RawRecord;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// Reads one station's hourly CSV into raw records.
///
/// Parsing is strict: a row that does not match the PRSA column schema fails
/// the whole file. Missing measurements (`NA` or empty) are values, not
/// errors, and survive into `RawRecord` as `None`.
pub struct HourlyReader {
    use_mmap: bool,
}

impl HourlyReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read all hourly records from a single CSV file, preserving row order.
    pub fn read_file(&self, path: &Path) -> Result<Vec<RawRecord>> {
        if self.use_mmap {
            self.read_mmap(path)
        } else {
            self.read_buffered(path)
        }
    }

    fn read_buffered(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.collect_records(csv::Reader::from_reader(reader))
    }

    /// Memory-mapped read path for large station files.
    fn read_mmap(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.collect_records(csv::Reader::from_reader(&mmap[..]))
    }

    fn collect_records<R: Read>(&self, mut reader: csv::Reader<R>) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

impl Default for HourlyReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

    #[test]
    fn test_read_station_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin"
        )?;
        writeln!(
            temp_file,
            "2,2013,3,1,1,8,8,NA,7,300,77,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin"
        )?;

        let reader = HourlyReader::new();
        let records = reader.read_file(temp_file.path())?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].no, 1);
        assert_eq!(records[0].pm25, Some(4.0));
        assert_eq!(records[1].so2, None);
        assert_eq!(records[1].wind_label.as_deref(), Some("N"));

        Ok(())
    }

    #[test]
    fn test_mmap_path_matches_buffered() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Changping"
        )?;

        let buffered = HourlyReader::new().read_file(temp_file.path())?;
        let mapped = HourlyReader::with_mmap(true).read_file(temp_file.path())?;

        assert_eq!(buffered.len(), mapped.len());
        assert_eq!(buffered[0].station, mapped[0].station);

        Ok(())
    }

    #[test]
    fn test_malformed_file_is_fatal() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "timestamp,value")?;
        writeln!(temp_file, "2013-03-01,4")?;

        let reader = HourlyReader::new();
        assert!(reader.read_file(temp_file.path()).is_err());

        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let reader = HourlyReader::new();
        let err = reader.read_file(Path::new("no-such-file.csv")).unwrap_err();
        assert!(matches!(err, crate::error::ProcessingError::Io(_)));
    }
}
