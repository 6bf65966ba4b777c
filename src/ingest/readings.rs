/// Latest-readings endpoint: URL construction, fetch, and ordering.
///
/// The provider is asked for the newest `limit` readings via `_limit=n`
/// and `_sort=-dateTime`, then the batch is re-sorted oldest-first
/// locally. Storage order therefore stays stable even if the provider
/// ignores the sort hint or over-returns.
use log::{info, warn};
use serde_json::Value;

use crate::api::ApiClient;
use crate::ingest::station::ItemsEnvelope;
use crate::model::{PipelineError, ValidationError};

/// Builds the readings URL for a measure id.
pub fn readings_url(base_url: &str, measure_id: &str) -> String {
    format!(
        "{}/id/measures/{}/readings.json",
        base_url,
        urlencoding::encode(measure_id)
    )
}

/// Query pairs for the latest-readings request: a window of `limit`
/// readings, server-sorted newest first.
pub fn latest_query(limit: u32) -> [(&'static str, String); 2] {
    [
        ("_limit", limit.to_string()),
        ("_sort", "-dateTime".to_string()),
    ]
}

/// Fetches the `limit` most recent readings for a measure, oldest first.
///
/// Zero readings is not an error; the caller decides what an empty batch
/// means. A zero `limit` is rejected before any network call.
pub fn fetch_latest(
    api: &ApiClient,
    base_url: &str,
    measure_id: &str,
    limit: u32,
) -> Result<Vec<Value>, PipelineError> {
    if limit == 0 {
        return Err(ValidationError::NonPositiveLimit(limit).into());
    }

    let url = readings_url(base_url, measure_id);
    let query = latest_query(limit);
    info!(
        "fetching latest {} readings for measure_id={}",
        limit, measure_id
    );

    let body = api.get_json(&url, &query)?;
    let envelope: ItemsEnvelope = serde_json::from_value(body)
        .map_err(|_| ValidationError::MalformedReadings(measure_id.to_string()))?;

    if envelope.items.is_empty() {
        warn!("no readings returned for measure_id={}", measure_id);
    }

    Ok(chronological(envelope.items, limit as usize))
}

/// Newest-first sort, truncate to `limit`, then reverse: exactly the newest
/// `limit` readings in ascending timestamp order.
pub fn chronological(mut items: Vec<Value>, limit: usize) -> Vec<Value> {
    items.sort_by(|a, b| timestamp_of(b).cmp(timestamp_of(a)));
    items.truncate(limit);
    items.reverse();
    items
}

/// Sort key: the reading's `dateTime`, falling back to `date`. The provider
/// emits uniform UTC stamps within a series, so lexicographic order is
/// chronological.
fn timestamp_of(reading: &Value) -> &str {
    reading
        .get("dateTime")
        .or_else(|| reading.get("date"))
        .and_then(Value::as_str)
        .unwrap_or("")
}
