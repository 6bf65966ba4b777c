/// Ingest layer: one module per Hydrology API endpoint, plus the measure
/// resolution heuristics that bridge station metadata to the readings
/// endpoint. New endpoints get their own file under ingest/ rather than
/// bloating an existing one.
pub mod measures;
pub mod readings;
pub mod station;

pub(crate) mod fixtures;
