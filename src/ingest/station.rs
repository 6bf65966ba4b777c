/// Station metadata endpoint: URL construction + response unwrapping.
///
/// `GET {base}/id/stations/{notation}.json` answers with an `items` array
/// that carries at most one station object for a concrete notation. That
/// object holds everything downstream needs: identifier candidates,
/// coordinates, and the `measures` list the resolver reads.
use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::model::{PipelineError, ValidationError};

/// Envelope shared by the station and readings endpoints: everything of
/// interest sits under `items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Builds the station metadata URL for a notation.
pub fn station_url(base_url: &str, notation: &str) -> String {
    format!(
        "{}/id/stations/{}.json",
        base_url,
        urlencoding::encode(notation)
    )
}

/// Unwraps the station response body to `items[0]`.
///
/// An empty or absent `items` array means the notation matched nothing;
/// that is `StationNotFound`, not an empty success.
pub fn station_from_body(body: Value, notation: &str) -> Result<Value, ValidationError> {
    let envelope: ItemsEnvelope = serde_json::from_value(body)
        .map_err(|e| ValidationError::MalformedStation(e.to_string()))?;
    envelope
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ValidationError::StationNotFound(notation.to_string()))
}

/// Fetches the raw station payload for `notation`.
pub fn fetch_station(
    api: &ApiClient,
    base_url: &str,
    notation: &str,
) -> Result<Value, PipelineError> {
    let url = station_url(base_url, notation);
    info!("fetching station metadata for notation={}", notation);

    let body = api.get_json(&url, &[])?;
    let item = station_from_body(body, notation)?;
    info!("station metadata fetched for notation={}", notation);
    Ok(item)
}
