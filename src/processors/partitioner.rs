use std::collections::HashMap;

use crate::error::{ProcessingError, Result};
use crate::models::HourlyRecord;

/// Splits the normalized sequence into per-station subsequences.
///
/// Each record lands in exactly one group and keeps its relative order
/// within that group. The station column is guaranteed present by the CSV
/// schema; an empty identifier is surfaced as a data-integrity error rather
/// than silently grouped under "".
pub struct StationPartitioner;

impl StationPartitioner {
    pub fn new() -> Self {
        Self
    }

    pub fn partition(&self, records: Vec<HourlyRecord>) -> Result<HashMap<String, Vec<HourlyRecord>>> {
        let mut groups: HashMap<String, Vec<HourlyRecord>> = HashMap::new();
        for record in records {
            if record.station.is_empty() {
                return Err(ProcessingError::DataIntegrity(format!(
                    "Record at {} has an empty station identifier",
                    record.timestamp
                )));
            }
            groups
                .entry(record.station.clone())
                .or_default()
                .push(record);
        }
        Ok(groups)
    }
}

impl Default for StationPartitioner {
    fn default() -> Self {
        Self::new()
    }
}
