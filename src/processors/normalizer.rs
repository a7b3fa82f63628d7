use crate::error::Result;
use crate::models::{HourlyRecord, RawRecord, WindDirection};

/// Cleans the unified raw sequence into fully-populated hourly records.
///
/// Per record, in order: derive the hour timestamp, derive the summed
/// pollutant index (missing addends propagate), map the compass label to
/// degrees, then apply the drop-any-missing rule once. Columns with no
/// downstream use (row id, calendar fields, TEMP, PRES, DEWP, WSPM) do not
/// survive into the output.
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a whole record sequence. An empty input yields an empty
    /// output; an impossible calendar combination anywhere is fatal.
    pub fn normalize(&self, raw: &[RawRecord]) -> Result<Vec<HourlyRecord>> {
        let mut records = Vec::with_capacity(raw.len());
        for record in raw {
            if let Some(normalized) = self.normalize_record(record)? {
                records.push(normalized);
            }
        }
        Ok(records)
    }

    /// Normalize one raw row, or drop it.
    ///
    /// Derivations run before the completeness check, so a row missing a
    /// pollutant still gets its timestamp computed and then discarded whole;
    /// nothing computed on a dropped row leaks downstream.
    pub fn normalize_record(&self, raw: &RawRecord) -> Result<Option<HourlyRecord>> {
        let timestamp = raw.timestamp()?;
        let pollutant_index = raw.pollutant_sum();
        let wind = raw.wind_label.as_deref().and_then(WindDirection::parse);

        Ok(
            Self::retained_fields(raw, wind, pollutant_index).map(|fields| {
                let (pm25, pm10, so2, no2, co, o3, rainfall, wind_direction, pollutant_index) =
                    fields;
                HourlyRecord {
                    timestamp,
                    station: raw.station.clone(),
                    wind_direction,
                    wind_degrees: wind_direction.degrees(),
                    rainfall,
                    pm25,
                    pm10,
                    so2,
                    no2,
                    co,
                    o3,
                    pollutant_index,
                }
            }),
        )
    }

    /// The row-wise drop rule, in one place: a row survives cleaning only if
    /// every field retained for aggregation is present. An unmapped wind
    /// label counts as missing.
    #[allow(clippy::type_complexity)]
    fn retained_fields(
        raw: &RawRecord,
        wind: Option<WindDirection>,
        pollutant_index: Option<f64>,
    ) -> Option<(f64, f64, f64, f64, f64, f64, f64, WindDirection, f64)> {
        Some((
            raw.pm25?,
            raw.pm10?,
            raw.so2?,
            raw.no2?,
            raw.co?,
            raw.o3?,
            raw.rainfall?,
            wind?,
            pollutant_index?,
        ))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
