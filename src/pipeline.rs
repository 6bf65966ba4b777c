/// Pipeline orchestrator: extract, transform, load for one station and two
/// observed parameters. Sequential and single-threaded; one invocation is
/// one run.
///
/// Failures before the per-parameter loop (store open, station fetch,
/// station normalize, measure resolution) abort the run. Inside the loop
/// each parameter is isolated: a failure is logged and recorded in the
/// summary while the other parameter still processes. Every store write
/// commits independently, so a partially failed run leaves valid rows
/// behind and re-running is always safe.
use log::{error, info};

use crate::api::ApiClient;
use crate::config::RunConfig;
use crate::db::Store;
use crate::ingest::{measures, readings, station};
use crate::model::{MeasurementRecord, PipelineError};
use crate::transform;

/// Outcome of one run: what landed where, and which parameters failed.
#[derive(Debug)]
pub struct RunSummary {
    pub station_id: String,
    /// Newly inserted row count per parameter, in processing order.
    pub inserted: Vec<(String, usize)>,
    /// Parameters that failed, with the rendered cause.
    pub failures: Vec<(String, String)>,
}

impl RunSummary {
    pub fn total_inserted(&self) -> usize {
        self.inserted.iter().map(|(_, n)| n).sum()
    }

    pub fn had_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs the pipeline once against `cfg`.
pub fn run(cfg: &RunConfig) -> Result<RunSummary, PipelineError> {
    info!(
        "starting pipeline: station={} params={:?} limit={} db={}",
        cfg.station_notation,
        cfg.params,
        cfg.limit,
        cfg.db_path.display()
    );

    let mut store = Store::open(&cfg.db_path)?;
    store.init_schema()?;

    let api = ApiClient::new(cfg.timeout_secs)?;

    let station_item = station::fetch_station(&api, &cfg.base_url, &cfg.station_notation)?;
    let station_row = transform::normalize_station(&station_item)?;
    let resolved = measures::resolve_measures(&station_item, &cfg.params)?;

    store.upsert_station(&station_row)?;

    let mut summary = RunSummary {
        station_id: station_row.station_id.clone(),
        inserted: Vec::new(),
        failures: Vec::new(),
    };

    for (observed_property, measure_id) in &resolved {
        match ingest_parameter(
            &api,
            cfg,
            &mut store,
            &station_row.station_id,
            observed_property,
            measure_id,
        ) {
            Ok(count) => {
                info!("inserted {} {} measurements", count, observed_property);
                summary.inserted.push((observed_property.clone(), count));
            }
            Err(e) => {
                error!(
                    "parameter {} (measure_id={}) failed: {}",
                    observed_property, measure_id, e
                );
                summary
                    .failures
                    .push((observed_property.clone(), e.to_string()));
            }
        }
    }

    info!(
        "pipeline finished: station={} inserted={} failed_parameters={}",
        summary.station_id,
        summary.total_inserted(),
        summary.failures.len()
    );
    Ok(summary)
}

/// Fetches, normalizes, and stores one parameter's readings. Returns the
/// count of newly inserted rows.
fn ingest_parameter(
    api: &ApiClient,
    cfg: &RunConfig,
    store: &mut Store,
    station_id: &str,
    observed_property: &str,
    measure_id: &str,
) -> Result<usize, PipelineError> {
    let raw = readings::fetch_latest(api, &cfg.base_url, measure_id, cfg.limit)?;
    info!(
        "fetched {} readings for {} (measure_id={})",
        raw.len(),
        observed_property,
        measure_id
    );

    let mut rows: Vec<MeasurementRecord> = Vec::with_capacity(raw.len());
    for reading in &raw {
        rows.push(transform::normalize_reading(
            reading,
            station_id,
            observed_property,
            measure_id,
        )?);
    }

    Ok(store.insert_measurements(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals_and_failure_flag() {
        let summary = RunSummary {
            station_id: "E64999A".to_string(),
            inserted: vec![
                ("conductivity".to_string(), 10),
                ("dissolved-oxygen".to_string(), 7),
            ],
            failures: Vec::new(),
        };
        assert_eq!(summary.total_inserted(), 17);
        assert!(!summary.had_failures());
    }

    #[test]
    fn test_summary_with_one_failed_parameter() {
        let summary = RunSummary {
            station_id: "E64999A".to_string(),
            inserted: vec![("conductivity".to_string(), 10)],
            failures: vec![(
                "dissolved-oxygen".to_string(),
                "hydrology API request failed: HTTP status 500".to_string(),
            )],
        };
        assert_eq!(summary.total_inserted(), 10);
        assert!(summary.had_failures());
    }

    #[test]
    fn test_run_opens_store_before_failing_on_unreachable_endpoint() {
        // Port 0 is never connectable, so the run stays offline and dies at
        // the station fetch. The database file must already exist by then:
        // store setup precedes any network work.
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = RunConfig::new(
            "E64999A".to_string(),
            Vec::new(),
            10,
            dir.path().join("h.db"),
            1,
        );
        cfg.base_url = "http://127.0.0.1:0".to_string();

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Api(_)));
        assert!(dir.path().join("h.db").exists());
    }
}
