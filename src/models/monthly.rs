use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::WindDirection;

/// One calendar month's summary for one station, labeled by month end.
///
/// Emitted by the monthly aggregator only when every non-identifier field
/// reduced to a value; months with no contributing hours are absent rather
/// than present-but-empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonthlyRecord {
    /// Last day of the summarized calendar month.
    pub month_end: NaiveDate,

    pub station: String,

    /// Most frequent wind label over the month.
    pub wind_mode: WindDirection,

    /// Mean of the hourly wind bearings.
    #[validate(range(min = 0.0, max = 337.5))]
    pub wind_degrees: f64,

    #[validate(range(min = 0.0))]
    pub rainfall: f64,

    #[validate(range(min = 0.0))]
    pub pm25: f64,

    #[validate(range(min = 0.0))]
    pub pm10: f64,

    #[validate(range(min = 0.0))]
    pub so2: f64,

    #[validate(range(min = 0.0))]
    pub no2: f64,

    #[validate(range(min = 0.0))]
    pub co: f64,

    #[validate(range(min = 0.0))]
    pub o3: f64,

    #[validate(range(min = 0.0))]
    pub pollutant_index: f64,
}

impl MonthlyRecord {
    /// `MM-YYYY` rendering used by the analysis report.
    pub fn month_label(&self) -> String {
        self.month_end.format("%m-%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label() {
        let record = MonthlyRecord {
            month_end: NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
            station: "Gucheng".to_string(),
            wind_mode: WindDirection::NE,
            wind_degrees: 120.0,
            rainfall: 0.05,
            pm25: 160.0,
            pm10: 190.0,
            so2: 30.0,
            no2: 90.0,
            co: 2500.0,
            o3: 25.0,
            pollutant_index: 2995.0,
        };
        assert_eq!(record.month_label(), "12-2015");
    }
}
