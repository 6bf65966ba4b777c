/// Run configuration for the ETL pipeline.
///
/// Endpoint and default constants plus an immutable `RunConfig` assembled
/// from CLI arguments. The API base URL can be overridden through the
/// HYDROLOGY_BASE_URL environment variable (a local .env file is honoured),
/// which keeps tests and mirrors off the production endpoint.
use std::env;
use std::path::PathBuf;

use crate::model::{PARAM_CONDUCTIVITY, PARAM_DISSOLVED_OXYGEN};

/// Production base endpoint for the Environment Agency Hydrology API.
pub const BASE_URL: &str = "https://environment.data.gov.uk/hydrology";

/// Station monitored by default (Hydrology API notation).
pub const DEFAULT_STATION_NOTATION: &str = "E64999A";

/// Number of latest readings fetched per parameter by default.
pub const DEFAULT_LIMIT: u32 = 10;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default SQLite database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/hydrology.db";

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub station_notation: String,
    pub params: Vec<String>,
    pub limit: u32,
    pub db_path: PathBuf,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl RunConfig {
    /// Assembles a run configuration. An empty parameter list becomes the
    /// two supported parameters, and the base URL falls back from
    /// HYDROLOGY_BASE_URL to the production endpoint. Trailing slashes on
    /// the base URL are trimmed so joined paths stay clean.
    pub fn new(
        station_notation: String,
        params: Vec<String>,
        limit: u32,
        db_path: PathBuf,
        timeout_secs: u64,
    ) -> Self {
        let params = if params.is_empty() {
            vec![
                PARAM_CONDUCTIVITY.to_string(),
                PARAM_DISSOLVED_OXYGEN.to_string(),
            ]
        } else {
            params
        };
        let base_url = env::var("HYDROLOGY_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        Self {
            station_notation,
            params,
            limit,
            db_path,
            timeout_secs,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
