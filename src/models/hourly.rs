use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::WindDirection;

/// One hourly observation after cleaning.
///
/// Construction goes through the normalizer, which guarantees every field is
/// populated: rows with any missing pollutant or meteorological value never
/// become an `HourlyRecord`. The aggregator relies on that completeness.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HourlyRecord {
    pub timestamp: NaiveDateTime,
    pub station: String,

    pub wind_direction: WindDirection,

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

    /// Sum of the six concentrations above, derived before cleaning.
    #[validate(range(min = 0.0))]
    pub pollutant_index: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_field_validation() {
        let record = HourlyRecord {
            timestamp: NaiveDate::from_ymd_opt(2013, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            station: "Dingling".to_string(),
            wind_direction: WindDirection::N,
            wind_degrees: 0.0,
            rainfall: 0.2,
            pm25: 8.0,
            pm10: 12.0,
            so2: 3.0,
            no2: 15.0,
            co: 300.0,
            o3: 80.0,
            pollutant_index: 418.0,
        };
        assert!(record.validate().is_ok());

        let negative = HourlyRecord {
            rainfall: -1.0,
            ..record
        };
        assert!(negative.validate().is_err());
    }
}
