/// Pure normalizers: raw Hydrology API payloads into typed records.
///
/// No I/O and no clock; output is fully determined by input. Raw JSON goes
/// through serde intermediates first so shape problems surface in one place
/// instead of scattering field lookups through the pipeline.
///
/// Strictness is deliberately asymmetric. Identity and time are load-bearing
/// (they form the dedup key), so a record with a bad identifier, coordinate,
/// or timestamp is rejected. The measured value is not, so a non-numeric
/// value degrades to NULL and the reading is kept.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{MeasurementRecord, QUALITY_FLAGS, StationRecord, ValidationError};

// ---------------------------------------------------------------------------
// Raw payload shapes
// ---------------------------------------------------------------------------

/// Station fields the pipeline reads. Coordinates stay as raw JSON values
/// because the provider has emitted both numbers and numeric strings.
#[derive(Debug, Deserialize)]
struct RawStation {
    notation: Option<String>,
    #[serde(rename = "stationGuid")]
    station_guid: Option<String>,
    #[serde(rename = "@id")]
    id_uri: Option<String>,
    label: Option<String>,
    lat: Option<Value>,
    long: Option<Value>,
    #[serde(rename = "riverName")]
    river_name: Option<String>,
    #[serde(rename = "dateOpened")]
    date_opened: Option<String>,
}

/// Reading fields the pipeline reads. `value` stays raw for the best-effort
/// float coercion; daily series carry `date` instead of `dateTime`.
#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
    value: Option<Value>,
    quality: Option<String>,
    completeness: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

/// Normalizes one station payload (the `items[0]` object of the station
/// endpoint) into a `StationRecord`.
///
/// The identifier is the first non-empty of `notation`, `stationGuid`,
/// `@id`. Both coordinates must coerce to finite floats; a missing `label`
/// becomes the empty string.
pub fn normalize_station(item: &Value) -> Result<StationRecord, ValidationError> {
    let raw: RawStation = serde_json::from_value(item.clone())
        .map_err(|e| ValidationError::MalformedStation(e.to_string()))?;

    let station_id = [raw.notation, raw.station_guid, raw.id_uri]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .ok_or(ValidationError::MissingStationId)?;

    let lat = coerce_coordinate(raw.lat.as_ref()).ok_or(ValidationError::BadCoordinate("lat"))?;
    let long =
        coerce_coordinate(raw.long.as_ref()).ok_or(ValidationError::BadCoordinate("long"))?;

    Ok(StationRecord {
        station_id,
        label: raw.label.unwrap_or_default(),
        lat,
        long,
        river_name: raw.river_name,
        date_opened: raw.date_opened,
    })
}

/// Normalizes one reading payload into a `MeasurementRecord` keyed to the
/// given station, parameter, and measure.
///
/// The timestamp is the first non-empty of `dateTime`, `date`; it must be
/// ISO 8601 and any trailing `Z` is rewritten to `+00:00` so stored stamps
/// compare consistently. A quality flag outside the documented set is kept
/// but logged.
pub fn normalize_reading(
    reading: &Value,
    station_id: &str,
    observed_property: &str,
    measure_id: &str,
) -> Result<MeasurementRecord, ValidationError> {
    let raw: RawReading = serde_json::from_value(reading.clone())
        .map_err(|e| ValidationError::MalformedReading(e.to_string()))?;

    let stamp = [raw.date_time, raw.date]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::MissingTimestamp(measure_id.to_string()))?;
    let date_time = validate_timestamp(&stamp)?;

    let value = raw.value.as_ref().and_then(coerce_value);

    if let Some(quality) = raw.quality.as_deref() {
        if !QUALITY_FLAGS.contains(&quality) {
            warn!(
                "unexpected quality flag `{}` for measure_id={}",
                quality, measure_id
            );
        }
    }

    Ok(MeasurementRecord {
        station_id: station_id.to_string(),
        observed_property: observed_property.to_string(),
        measure_id: measure_id.to_string(),
        date_time,
        value,
        quality: raw.quality,
        completeness: raw.completeness,
    })
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Accepts a JSON number or a string parseable as a float; anything else,
/// or a non-finite result, is rejected.
fn coerce_coordinate(v: Option<&Value>) -> Option<f64> {
    let parsed = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Best-effort float coercion for measured values: JSON numbers and numeric
/// strings produce a value, everything else collapses to None.
fn coerce_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Rewrites a trailing `Z` to an explicit `+00:00` offset, then checks the
/// result parses as ISO 8601. The provider emits offset datetimes for
/// sub-daily series, and naive datetimes or plain dates for daily ones.
fn validate_timestamp(stamp: &str) -> Result<String, ValidationError> {
    let cleaned = match stamp.strip_suffix('Z') {
        Some(prefix) => format!("{}+00:00", prefix),
        None => stamp.to_string(),
    };
    let parses = DateTime::parse_from_rfc3339(&cleaned).is_ok()
        || NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d").is_ok();
    if parses {
        Ok(cleaned)
    } else {
        Err(ValidationError::BadTimestamp(stamp.to_string()))
    }
}
