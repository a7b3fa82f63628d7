use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ProcessingError, Result};
use crate::models::{CleanDataset, MonthlyRecord};

/// Answers the report's four analytical questions over the combined dataset:
/// does wind direction affect pollution, does rainfall, and which
/// station-month had the worst and the best air.
pub struct AirQualityAnalyzer;

#[derive(Debug, Clone, Serialize)]
pub struct AirQualityStatistics {
    pub total_records: usize,
    pub station_count: usize,
    pub date_range: (NaiveDate, NaiveDate),
    /// Pearson r between wind bearing and pollutant index.
    pub wind_correlation: f64,
    /// Pearson r between rainfall and pollutant index.
    pub rain_correlation: f64,
    pub worst: ExtremeMonth,
    pub best: ExtremeMonth,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtremeMonth {
    pub station: String,
    pub month: String,
    pub pollutant_index: f64,
}

impl From<&MonthlyRecord> for ExtremeMonth {
    fn from(record: &MonthlyRecord) -> Self {
        Self {
            station: record.station.clone(),
            month: record.month_label(),
            pollutant_index: record.pollutant_index,
        }
    }
}

/// Descriptive summary of one station's monthly series.
#[derive(Debug, Clone, Serialize)]
pub struct StationSummary {
    pub station: String,
    pub months: usize,
    pub first_month: NaiveDate,
    pub last_month: NaiveDate,
    pub mean_pollutant_index: f64,
    pub min_pollutant_index: f64,
    pub max_pollutant_index: f64,
    pub mean_rainfall: f64,
}

impl AirQualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, dataset: &CleanDataset) -> Result<AirQualityStatistics> {
        let records = dataset.combined();
        if records.is_empty() {
            return Err(ProcessingError::Config(
                "No records to analyze".to_string(),
            ));
        }

        let mut min_date = records[0].month_end;
        let mut max_date = records[0].month_end;
        let mut stations = std::collections::HashSet::new();
        for record in records {
            if record.month_end < min_date {
                min_date = record.month_end;
            }
            if record.month_end > max_date {
                max_date = record.month_end;
            }
            stations.insert(record.station.as_str());
        }

        let index: Vec<f64> = records.iter().map(|r| r.pollutant_index).collect();
        let wind: Vec<f64> = records.iter().map(|r| r.wind_degrees).collect();
        let rain: Vec<f64> = records.iter().map(|r| r.rainfall).collect();

        let worst = dataset.worst_month().ok_or_else(|| {
            ProcessingError::Config("No records to analyze".to_string())
        })?;
        let best = dataset.best_month().ok_or_else(|| {
            ProcessingError::Config("No records to analyze".to_string())
        })?;

        Ok(AirQualityStatistics {
            total_records: records.len(),
            station_count: stations.len(),
            date_range: (min_date, max_date),
            wind_correlation: pearson(&wind, &index),
            rain_correlation: pearson(&rain, &index),
            worst: worst.into(),
            best: best.into(),
        })
    }

    /// Descriptive statistics for one station's monthly series.
    pub fn summarize_station(&self, name: &str, dataset: &CleanDataset) -> Result<StationSummary> {
        let months = dataset.station(name).ok_or_else(|| {
            ProcessingError::Config(format!("Station '{}' not found in dataset", name))
        })?;
        if months.is_empty() {
            return Err(ProcessingError::MissingData(format!(
                "Station '{}' has no monthly records",
                name
            )));
        }

        let n = months.len() as f64;
        let mut min_index = f64::INFINITY;
        let mut max_index = f64::NEG_INFINITY;
        for record in months {
            min_index = min_index.min(record.pollutant_index);
            max_index = max_index.max(record.pollutant_index);
        }

        Ok(StationSummary {
            station: name.to_string(),
            months: months.len(),
            first_month: months[0].month_end,
            last_month: months[months.len() - 1].month_end,
            mean_pollutant_index: months.iter().map(|r| r.pollutant_index).sum::<f64>() / n,
            min_pollutant_index: min_index,
            max_pollutant_index: max_index,
            mean_rainfall: months.iter().map(|r| r.rainfall).sum::<f64>() / n,
        })
    }
}

impl Default for AirQualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualityStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Air Quality Report:\n\
            - Records: {} station-months across {} stations\n\
            - Date range: {} to {}\n\
            - Wind direction vs. pollutant index: r = {:.4} ({})\n\
            - Rainfall vs. pollutant index: r = {:.4} ({})\n\
            - Worst air quality: {} in {} (index {:.1})\n\
            - Best air quality: {} in {} (index {:.1})",
            self.total_records,
            self.station_count,
            self.date_range.0,
            self.date_range.1,
            self.wind_correlation,
            describe_correlation(self.wind_correlation),
            self.rain_correlation,
            describe_correlation(self.rain_correlation),
            self.worst.station,
            self.worst.month,
            self.worst.pollutant_index,
            self.best.station,
            self.best.month,
            self.best.pollutant_index,
        )
    }

    pub fn detailed_summary(&self) -> String {
        format!(
            "{}\n\n\
            Conclusions:\n\
            - Wind direction shows a {} relationship with pollutant concentration.\n\
            - Rainfall shows a {} relationship with pollutant concentration.\n\
            - {} had the worst air quality, in {} (pollutant index {:.1}).\n\
            - {} had the best air quality, in {} (pollutant index {:.1}).",
            self.summary(),
            describe_correlation(self.wind_correlation),
            describe_correlation(self.rain_correlation),
            self.worst.station,
            self.worst.month,
            self.worst.pollutant_index,
            self.best.station,
            self.best.month,
            self.best.pollutant_index,
        )
    }
}

/// Pearson product-moment correlation. Zero variance in either series
/// yields NaN, matching the undefined statistical result.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    numerator / denominator
}

fn describe_correlation(r: f64) -> String {
    if r.is_nan() {
        return "undefined".to_string();
    }
    let strength = match r.abs() {
        a if a < 0.2 => "very weak",
        a if a < 0.3 => "weak",
        a if a < 0.5 => "moderate",
        a if a < 0.7 => "strong",
        _ => "very strong",
    };
    let direction = if r < 0.0 { "negative" } else { "positive" };
    format!("{} {}", strength, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WindDirection;
    use std::collections::HashMap;

    fn monthly(station: &str, month: u32, index: f64, wind: f64, rain: f64) -> MonthlyRecord {
        MonthlyRecord {
            month_end: NaiveDate::from_ymd_opt(2013, month, 28).unwrap(),
            station: station.to_string(),
            wind_mode: WindDirection::N,
            wind_degrees: wind,
            rainfall: rain,
            pm25: index / 6.0,
            pm10: index / 6.0,
            so2: index / 6.0,
            no2: index / 6.0,
            co: index / 6.0,
            o3: index / 6.0,
            pollutant_index: index,
        }
    }

    fn dataset(rows: Vec<MonthlyRecord>) -> CleanDataset {
        let mut by_station: HashMap<String, Vec<MonthlyRecord>> = HashMap::new();
        for row in &rows {
            by_station
                .entry(row.station.clone())
                .or_default()
                .push(row.clone());
        }
        CleanDataset::new(by_station, rows)
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let rows = vec![
            monthly("A", 1, 300.0, 0.0, 3.0),
            monthly("A", 2, 200.0, 90.0, 2.0),
            monthly("A", 3, 100.0, 180.0, 1.0),
        ];
        let stats = AirQualityAnalyzer::new().analyze(&dataset(rows)).unwrap();

        assert!((stats.wind_correlation - -1.0).abs() < 1e-12);
        assert!((stats.rain_correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extremes_and_range() {
        let rows = vec![
            monthly("Dingling", 9, 624.0, 0.0, 1.0),
            monthly("Gucheng", 12, 3674.0, 90.0, 0.1),
            monthly("Shunyi", 6, 1200.0, 180.0, 2.0),
        ];
        let stats = AirQualityAnalyzer::new().analyze(&dataset(rows)).unwrap();

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.station_count, 3);
        assert_eq!(stats.worst.station, "Gucheng");
        assert_eq!(stats.worst.month, "12-2013");
        assert_eq!(stats.best.station, "Dingling");
        assert_eq!(
            stats.date_range,
            (
                NaiveDate::from_ymd_opt(2013, 6, 28).unwrap(),
                NaiveDate::from_ymd_opt(2013, 12, 28).unwrap()
            )
        );
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let err = AirQualityAnalyzer::new()
            .analyze(&dataset(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
    }

    #[test]
    fn test_station_summary() {
        let rows = vec![
            monthly("Dingling", 1, 100.0, 0.0, 1.0),
            monthly("Dingling", 2, 300.0, 0.0, 3.0),
        ];
        let summary = AirQualityAnalyzer::new()
            .summarize_station("Dingling", &dataset(rows))
            .unwrap();

        assert_eq!(summary.months, 2);
        assert_eq!(summary.mean_pollutant_index, 200.0);
        assert_eq!(summary.min_pollutant_index, 100.0);
        assert_eq!(summary.max_pollutant_index, 300.0);
        assert_eq!(summary.mean_rainfall, 2.0);
    }

    #[test]
    fn test_unknown_station_summary_is_config_error() {
        let err = AirQualityAnalyzer::new()
            .summarize_station("Atlantis", &dataset(vec![monthly("A", 1, 1.0, 0.0, 0.0)]))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
    }

    #[test]
    fn test_zero_variance_correlation_is_undefined() {
        let xs = [1.0, 1.0, 1.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(pearson(&xs, &ys).is_nan());
        assert_eq!(describe_correlation(f64::NAN), "undefined");
    }

    #[test]
    fn test_correlation_description() {
        assert_eq!(describe_correlation(-0.194), "very weak negative");
        assert_eq!(describe_correlation(-0.35), "moderate negative");
        assert_eq!(describe_correlation(0.8), "very strong positive");
    }
}
