/// Measure resolution: maps requested logical parameters onto the
/// provider's measure identifiers.
///
/// The Hydrology API encodes what a measure observes in its URI tail, e.g.
/// `E64999A-cond-i-subdaily-uscm` or `E64999A-do-i-subdaily-mgl`. There is
/// no structured field that says "this one is conductivity", so resolution
/// is a substring heuristic over those tails. Deliberately provider-specific
/// and limited to the two parameters this pipeline supports.
use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    ALLOWED_PARAMETERS, PARAM_CONDUCTIVITY, PARAM_DISSOLVED_OXYGEN, ValidationError,
};

/// URI tail marker for conductivity measures.
const CONDUCTIVITY_MARKER: &str = "-cond-";

/// URI tail marker for dissolved-oxygen measures.
const DISSOLVED_OXYGEN_MARKER: &str = "-do-";

/// Marker for dissolved-oxygen series reported in milligrams per litre,
/// preferred over percent-saturation variants.
const MGL_MARKER: &str = "mgl";

/// The slice of the station payload the resolver reads.
#[derive(Debug, Deserialize)]
struct StationMeasures {
    #[serde(default)]
    measures: Vec<MeasureRef>,
}

#[derive(Debug, Deserialize)]
struct MeasureRef {
    #[serde(rename = "@id", default)]
    id_uri: String,
}

/// Extracts the measure identifier from a measure URI: the text after the
/// last `/measures/` segment, or the whole string when the segment is
/// absent.
pub fn measure_id_from_uri(uri: &str) -> &str {
    uri.rsplit("/measures/").next().unwrap_or(uri)
}

/// True when a lowercased measure tail carries `marker`. A tail that opens
/// with the marker stem also qualifies: `cond-123` matches `-cond-` even
/// though nothing precedes it. Mid-string stems still need the surrounding
/// hyphens, so `second-stage` does not count as conductivity.
fn has_marker(tail: &str, marker: &str) -> bool {
    tail.contains(marker) || tail.starts_with(marker.trim_start_matches('-'))
}

/// Resolves the requested parameters to concrete measure ids from a raw
/// station payload.
///
/// Exactly two supported parameters must be requested (case-insensitive).
/// The result is always in canonical order (conductivity first, then
/// dissolved oxygen) regardless of request order, so run output and
/// storage sequence stay stable.
///
/// # Errors
/// - `ParameterCount` / `UnsupportedParameter` — bad request, checked
///   before the payload is touched.
/// - `NoMeasures` — the station carries no measures list.
/// - `UnresolvedMeasure` — no measure URI matched a parameter's marker.
pub fn resolve_measures(
    station_item: &Value,
    requested_params: &[String],
) -> Result<Vec<(String, String)>, ValidationError> {
    if requested_params.len() != 2 {
        return Err(ValidationError::ParameterCount(requested_params.len()));
    }
    let normalized: Vec<String> = requested_params.iter().map(|p| p.to_lowercase()).collect();
    if let Some(bad) = normalized
        .iter()
        .find(|p| !ALLOWED_PARAMETERS.contains(&p.as_str()))
    {
        return Err(ValidationError::UnsupportedParameter(bad.clone()));
    }

    let payload: StationMeasures = serde_json::from_value(station_item.clone())
        .map_err(|e| ValidationError::MalformedStation(e.to_string()))?;
    if payload.measures.is_empty() {
        return Err(ValidationError::NoMeasures);
    }

    let mut conductivity_candidates: Vec<String> = Vec::new();
    let mut oxygen_candidates: Vec<String> = Vec::new();

    for measure in &payload.measures {
        let id = measure_id_from_uri(&measure.id_uri);
        let tail = id.to_lowercase();
        if has_marker(&tail, CONDUCTIVITY_MARKER) {
            conductivity_candidates.push(id.to_string());
        }
        if has_marker(&tail, DISSOLVED_OXYGEN_MARKER) {
            oxygen_candidates.push(id.to_string());
        }
    }

    let conductivity = conductivity_candidates
        .first()
        .cloned()
        .ok_or_else(|| ValidationError::UnresolvedMeasure(PARAM_CONDUCTIVITY.to_string()))?;

    // Prefer mg/L over percent saturation when both variants exist.
    let dissolved_oxygen = oxygen_candidates
        .iter()
        .find(|c| c.to_lowercase().contains(MGL_MARKER))
        .or_else(|| oxygen_candidates.first())
        .cloned()
        .ok_or_else(|| ValidationError::UnresolvedMeasure(PARAM_DISSOLVED_OXYGEN.to_string()))?;

    info!(
        "resolved measures: conductivity={} dissolved-oxygen={}",
        conductivity, dissolved_oxygen
    );

    Ok(vec![
        (PARAM_CONDUCTIVITY.to_string(), conductivity),
        (PARAM_DISSOLVED_OXYGEN.to_string(), dissolved_oxygen),
    ])
}
