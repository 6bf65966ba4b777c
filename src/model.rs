/// Core data types for the hydrology ETL pipeline.
///
/// Shared domain model imported by the rest of the crate: the two persisted
/// record shapes, the supported observed-parameter names, and the error
/// kinds the pipeline distinguishes.
use thiserror::Error;

// ---------------------------------------------------------------------------
// Observed parameters
// ---------------------------------------------------------------------------

/// Logical parameter name for electrical conductivity.
pub const PARAM_CONDUCTIVITY: &str = "conductivity";

/// Logical parameter name for dissolved oxygen.
pub const PARAM_DISSOLVED_OXYGEN: &str = "dissolved-oxygen";

/// Parameters this pipeline knows how to resolve and ingest.
pub const ALLOWED_PARAMETERS: [&str; 2] = [PARAM_CONDUCTIVITY, PARAM_DISSOLVED_OXYGEN];

/// Quality flags the provider documents for readings. Anything else is
/// stored as-is but logged as unexpected.
pub const QUALITY_FLAGS: [&str; 5] = ["Good", "Estimated", "Suspect", "Unchecked", "Missing"];

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One monitoring station, normalized for the stations table.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub station_id: String,
    pub label: String,
    pub lat: f64,
    pub long: f64,
    pub river_name: Option<String>,
    pub date_opened: Option<String>,
}

/// One timestamped observation, normalized for the measurements table.
///
/// `(measure_id, date_time)` is the natural key; the store never updates an
/// existing pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub station_id: String,
    pub observed_property: String,
    pub measure_id: String,
    /// ISO 8601 timestamp with any trailing `Z` rewritten to `+00:00`.
    pub date_time: String,
    pub value: Option<f64>,
    pub quality: Option<String>,
    pub completeness: Option<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Umbrella error for the HTTP layer: transport failures, non-success
/// statuses, and bodies that fail to decode as JSON all land here. Callers
/// handle exactly one failure mode, with the request context attached.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("hydrology API request failed: {detail} (url={url} params={params})")]
pub struct ApiError {
    pub url: String,
    pub params: String,
    pub detail: String,
}

/// A payload or request argument that failed a pipeline precondition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("no station found for notation={0}")]
    StationNotFound(String),
    #[error("station payload did not deserialize: {0}")]
    MalformedStation(String),
    #[error("station payload carries no usable identifier (notation/stationGuid/@id)")]
    MissingStationId,
    #[error("station field `{0}` is missing or not a finite number")]
    BadCoordinate(&'static str),
    #[error("station payload has no measures list")]
    NoMeasures,
    #[error("could not resolve a {0} measure for this station")]
    UnresolvedMeasure(String),
    #[error("exactly two parameters are required, got {0}")]
    ParameterCount(usize),
    #[error("parameter `{0}` is not supported (expected conductivity / dissolved-oxygen)")]
    UnsupportedParameter(String),
    #[error("readings payload did not deserialize for measure_id={0}")]
    MalformedReadings(String),
    #[error("reading payload did not deserialize: {0}")]
    MalformedReading(String),
    #[error("reading is missing dateTime/date for measure_id={0}")]
    MissingTimestamp(String),
    #[error("reading timestamp `{0}` is not ISO 8601")]
    BadTimestamp(String),
    #[error("limit must be a positive integer, got {0}")]
    NonPositiveLimit(u32),
}

/// Top-level pipeline error: one of the kinds above, or a store failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] crate::db::StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_parameters_cover_both_constants() {
        assert!(ALLOWED_PARAMETERS.contains(&PARAM_CONDUCTIVITY));
        assert!(ALLOWED_PARAMETERS.contains(&PARAM_DISSOLVED_OXYGEN));
        assert_eq!(ALLOWED_PARAMETERS.len(), 2);
    }

    #[test]
    fn test_api_error_display_includes_request_context() {
        let err = ApiError {
            url: "https://example.test/readings.json".to_string(),
            params: "_limit=10&_sort=-dateTime".to_string(),
            detail: "HTTP status 500".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("https://example.test/readings.json"));
        assert!(text.contains("_limit=10"));
        assert!(text.contains("HTTP status 500"));
    }

    #[test]
    fn test_validation_error_display_names_the_offender() {
        let err = ValidationError::UnsupportedParameter("temperature".to_string());
        assert!(err.to_string().contains("temperature"));

        let err = ValidationError::StationNotFound("E64999A".to_string());
        assert!(err.to_string().contains("E64999A"));
    }

    #[test]
    fn test_pipeline_error_is_transparent_over_its_kinds() {
        let inner = ValidationError::NonPositiveLimit(0);
        let wrapped = PipelineError::from(inner.clone());
        assert_eq!(wrapped.to_string(), inner.to_string());
    }
}
