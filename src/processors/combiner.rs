use std::collections::HashMap;

use crate::error::{ProcessingError, Result};
use crate::models::MonthlyRecord;
use crate::utils::constants::REPORT_STATIONS;

/// Which stations the combined reporting dataset includes.
///
/// The published report combines a fixed ten-station subset while still
/// exposing every station individually; that subset is the named default
/// here rather than an implicit list buried in presentation code.
#[derive(Debug, Clone)]
pub enum StationSelection {
    All,
    Subset(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct CombineConfig {
    selection: StationSelection,
}

impl CombineConfig {
    /// Combine every station that produced a monthly series.
    pub fn all() -> Self {
        Self {
            selection: StationSelection::All,
        }
    }

    /// Combine an explicit list of stations, in list order.
    pub fn subset<I, S>(stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selection: StationSelection::Subset(stations.into_iter().map(Into::into).collect()),
        }
    }

    /// The report's ten-station subset.
    pub fn report_default() -> Self {
        Self::subset(REPORT_STATIONS)
    }

    pub fn selection(&self) -> &StationSelection {
        &self.selection
    }
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self::report_default()
    }
}

/// Concatenates per-station monthly series into the combined reporting rows.
///
/// Append order only; month-end dates repeat across stations and are neither
/// sorted nor deduplicated. Requesting a station with no monthly series is a
/// configuration error, not a silent omission.
pub struct DatasetCombiner {
    config: CombineConfig,
}

impl DatasetCombiner {
    pub fn new(config: CombineConfig) -> Self {
        Self { config }
    }

    pub fn combine(
        &self,
        by_station: &HashMap<String, Vec<MonthlyRecord>>,
    ) -> Result<Vec<MonthlyRecord>> {
        let names: Vec<&str> = match self.config.selection() {
            StationSelection::All => {
                let mut names: Vec<&str> = by_station.keys().map(String::as_str).collect();
                names.sort_unstable();
                names
            }
            StationSelection::Subset(list) => list.iter().map(String::as_str).collect(),
        };

        let mut combined = Vec::new();
        for name in names {
            let months = by_station.get(name).ok_or_else(|| {
                ProcessingError::Config(format!(
                    "Station '{}' is configured for the combined dataset but has no monthly data",
                    name
                ))
            })?;
            combined.extend_from_slice(months);
        }
        Ok(combined)
    }
}
