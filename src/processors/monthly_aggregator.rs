use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::{HourlyRecord, MonthlyRecord, WindDirection};

/// Resamples one station's hourly series to month-end granularity.
///
/// Records are grouped by calendar month and reduced field by field: the
/// station identifier must be single-valued, the wind label reduces to its
/// mode, everything numeric to its arithmetic mean. Calendar months with no
/// contributing records are skipped entirely, so partial first/last months
/// follow the same rule as interior months and a series shorter than one
/// month may legitimately produce nothing.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate a per-station subsequence into month-end records, in
    /// chronological order.
    pub fn aggregate(&self, records: &[HourlyRecord]) -> Result<Vec<MonthlyRecord>> {
        let mut groups: BTreeMap<(i32, u32), Vec<&HourlyRecord>> = BTreeMap::new();
        for record in records {
            let key = (record.timestamp.year(), record.timestamp.month());
            groups.entry(key).or_default().push(record);
        }

        let mut months = Vec::with_capacity(groups.len());
        for ((year, month), group) in groups {
            months.push(self.reduce_month(year, month, &group)?);
        }
        Ok(months)
    }

    fn reduce_month(
        &self,
        year: i32,
        month: u32,
        group: &[&HourlyRecord],
    ) -> Result<MonthlyRecord> {
        let first = group.first().ok_or_else(|| {
            ProcessingError::DataIntegrity(format!("Empty aggregation group for {}-{}", year, month))
        })?;

        let station = first.station.clone();
        if let Some(stray) = group.iter().find(|r| r.station != station) {
            return Err(ProcessingError::DataIntegrity(format!(
                "Aggregation group {}-{} mixes stations '{}' and '{}'",
                year, month, station, stray.station
            )));
        }

        let n = group.len() as f64;
        let record = MonthlyRecord {
            month_end: month_end(year, month)?,
            station,
            wind_mode: wind_mode(group),
            wind_degrees: group.iter().map(|r| r.wind_degrees).sum::<f64>() / n,
            rainfall: group.iter().map(|r| r.rainfall).sum::<f64>() / n,
            pm25: group.iter().map(|r| r.pm25).sum::<f64>() / n,
            pm10: group.iter().map(|r| r.pm10).sum::<f64>() / n,
            so2: group.iter().map(|r| r.so2).sum::<f64>() / n,
            no2: group.iter().map(|r| r.no2).sum::<f64>() / n,
            co: group.iter().map(|r| r.co).sum::<f64>() / n,
            o3: group.iter().map(|r| r.o3).sum::<f64>() / n,
            pollutant_index: group.iter().map(|r| r.pollutant_index).sum::<f64>() / n,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Most frequent wind label in the group; ties resolve to the
/// lexicographically smallest label.
fn wind_mode(group: &[&HourlyRecord]) -> WindDirection {
    let mut counts: HashMap<WindDirection, usize> = HashMap::new();
    for record in group {
        *counts.entry(record.wind_direction).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a_dir, a_count), (b_dir, b_count)| {
            a_count
                .cmp(b_count)
                .then_with(|| b_dir.label().cmp(a_dir.label()))
        })
        .map(|(dir, _)| dir)
        .unwrap_or(WindDirection::N)
}

/// Last day of the given calendar month.
fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("Invalid calendar month: {}-{}", year, month))
        })
}
