use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ProcessingError, Result};

/// Treat empty fields and the PRSA `NA` marker as missing numeric values.
fn de_na_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Same rule for the categorical wind-direction column.
fn de_na_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// One hourly observation exactly as it appears in a PRSA station CSV.
///
/// Concentrations are µg/m³ except CO; all six share a unit family, which is
/// what makes the summed pollutant index meaningful downstream. TEMP, PRES,
/// DEWP and WSPM are carried through parsing but discarded by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "No")]
    pub no: u32,

    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,

    #[serde(rename = "PM2.5", deserialize_with = "de_na_f64")]
    pub pm25: Option<f64>,

    #[serde(rename = "PM10", deserialize_with = "de_na_f64")]
    pub pm10: Option<f64>,

    #[serde(rename = "SO2", deserialize_with = "de_na_f64")]
    pub so2: Option<f64>,

    #[serde(rename = "NO2", deserialize_with = "de_na_f64")]
    pub no2: Option<f64>,

    #[serde(rename = "CO", deserialize_with = "de_na_f64")]
    pub co: Option<f64>,

    #[serde(rename = "O3", deserialize_with = "de_na_f64")]
    pub o3: Option<f64>,

    #[serde(rename = "TEMP", deserialize_with = "de_na_f64")]
    pub temperature: Option<f64>,

    #[serde(rename = "PRES", deserialize_with = "de_na_f64")]
    pub pressure: Option<f64>,

    #[serde(rename = "DEWP", deserialize_with = "de_na_f64")]
    pub dew_point: Option<f64>,

    #[serde(rename = "RAIN", deserialize_with = "de_na_f64")]
    pub rainfall: Option<f64>,

    #[serde(rename = "wd", deserialize_with = "de_na_string")]
    pub wind_label: Option<String>,

    #[serde(rename = "WSPM", deserialize_with = "de_na_f64")]
    pub wind_speed: Option<f64>,

    pub station: String,
}

impl RawRecord {
    /// Hour-resolution timestamp from the four calendar columns.
    ///
    /// An impossible calendar combination (e.g. February 30th) is a fatal
    /// parse error, not a missing value.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, 0, 0))
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Invalid observation time: {:04}-{:02}-{:02} hour {}",
                    self.year, self.month, self.day, self.hour
                ))
            })
    }

    /// Sum of the six pollutant concentrations, in fixed column order.
    /// Missing addends propagate: the sum is `None`, never zero-filled.
    pub fn pollutant_sum(&self) -> Option<f64> {
        Some(self.pm25? + self.pm10? + self.so2? + self.no2? + self.co? + self.o3?)
    }
}
