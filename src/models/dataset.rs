use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::MonthlyRecord;

/// Terminal data product of the pipeline.
///
/// Holds every station's monthly series plus the combined reporting view over
/// the configured station subset. Built once per run and handed to consumers
/// as an explicit value; nothing in this crate keeps it as global state.
/// The combined rows keep append order and their month-end dates are not
/// unique across stations.
#[derive(Debug, Clone, Serialize)]
pub struct CleanDataset {
    by_station: HashMap<String, Vec<MonthlyRecord>>,
    combined: Vec<MonthlyRecord>,
}

impl CleanDataset {
    pub fn new(by_station: HashMap<String, Vec<MonthlyRecord>>, combined: Vec<MonthlyRecord>) -> Self {
        Self {
            by_station,
            combined,
        }
    }

    /// All station names with a monthly series, sorted for stable display.
    pub fn stations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_station.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Monthly series for one station, in month order.
    pub fn station(&self, name: &str) -> Option<&[MonthlyRecord]> {
        self.by_station.get(name).map(Vec::as_slice)
    }

    /// The combined reporting rows, in append order.
    pub fn combined(&self) -> &[MonthlyRecord] {
        &self.combined
    }

    pub fn len(&self) -> usize {
        self.combined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    /// Station-month with the highest aggregate pollutant index (worst air).
    pub fn worst_month(&self) -> Option<&MonthlyRecord> {
        self.combined.iter().max_by(|a, b| cmp_index(a, b))
    }

    /// Station-month with the lowest aggregate pollutant index (best air).
    pub fn best_month(&self) -> Option<&MonthlyRecord> {
        self.combined.iter().min_by(|a, b| cmp_index(a, b))
    }
}

fn cmp_index(a: &MonthlyRecord, b: &MonthlyRecord) -> Ordering {
    // Indexes are finite by the normalizer's completeness guarantee.
    a.pollutant_index
        .partial_cmp(&b.pollutant_index)
        .unwrap_or(Ordering::Equal)
}
