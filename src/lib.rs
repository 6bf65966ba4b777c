/// hydro_etl: Environment Agency Hydrology API to SQLite ETL pipeline.
///
/// # Module structure
///
/// ```text
/// hydro_etl
/// ├── model      — shared data types (StationRecord, MeasurementRecord, error kinds)
/// ├── config     — endpoint constants + per-run configuration (CLI-fed, env-overridable)
/// ├── api        — blocking HTTP GET + JSON decode wrapper
/// ├── ingest
/// │   ├── station  — station metadata endpoint: URL construction + unwrapping
/// │   ├── measures — parameter → measure id resolution heuristics
/// │   ├── readings — latest-readings endpoint: URL, fetch, chronological ordering
/// │   └── fixtures (test only) — representative API response payloads
/// ├── transform  — pure normalizers: raw JSON → typed records
/// ├── db         — SQLite store: schema, station upsert, measurement dedup insert
/// └── pipeline   — orchestrator: run sequence, per-parameter isolation, summary
/// ```
pub mod api;
pub mod config;
pub mod db;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod transform;
