/// SQLite store for stations and measurements.
///
/// Owns the schema and the two idempotent write paths: stations are
/// upserted (last write wins), measurements are insert-or-skip on the
/// `(measure_id, date_time)` natural key. Foreign keys are enforced on
/// every connection so a measurement can never reference a missing station.
use std::fs;
use std::path::Path;

use log::{info, warn};
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::model::{MeasurementRecord, StationRecord};

/// Errors from store operations. Connection-level and schema failures are
/// fatal to the operation that hit them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite-backed store. One instance per pipeline run.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database at `path`, creating parent
    /// directories as needed. Foreign key enforcement is switched on here
    /// because SQLite leaves it off by default.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        info!("opened SQLite store at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates tables and indexes if absent. Safe to run on every start.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS stations (
                station_id   TEXT PRIMARY KEY,
                label        TEXT NOT NULL,
                lat          REAL NOT NULL,
                long         REAL NOT NULL,
                river_name   TEXT,
                date_opened  TEXT,
                extracted_at TEXT NOT NULL DEFAULT (datetime('now'))
             );

             CREATE TABLE IF NOT EXISTS measurements (
                station_id        TEXT NOT NULL REFERENCES stations(station_id),
                observed_property TEXT NOT NULL,
                measure_id        TEXT NOT NULL,
                date_time         TEXT NOT NULL,
                value             REAL,
                quality           TEXT,
                completeness      TEXT,
                ingested_at       TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (measure_id, date_time)
             );

             CREATE INDEX IF NOT EXISTS idx_measurements_station_property
             ON measurements (station_id, observed_property, date_time);",
        )?;
        info!("database schema ready");
        Ok(())
    }

    /// Inserts or fully replaces the station row keyed by `station_id`.
    /// Re-running with identical data leaves exactly one row behind.
    pub fn upsert_station(&self, station: &StationRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO stations (station_id, label, lat, long, river_name, date_opened)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (station_id) DO UPDATE SET
                label        = excluded.label,
                lat          = excluded.lat,
                long         = excluded.long,
                river_name   = excluded.river_name,
                date_opened  = excluded.date_opened,
                extracted_at = datetime('now')",
            params![
                station.station_id,
                station.label,
                station.lat,
                station.long,
                station.river_name,
                station.date_opened,
            ],
        )?;
        info!("upserted station {}", station.station_id);
        Ok(())
    }

    /// Inserts measurement rows in one transaction, skipping
    /// `(measure_id, date_time)` pairs already present. A row rejected for
    /// any other reason (e.g. a missing station reference) is logged and
    /// skipped rather than aborting the batch. Returns the count of rows
    /// actually inserted.
    pub fn insert_measurements(
        &mut self,
        rows: &[MeasurementRecord],
    ) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO measurements
                    (station_id, observed_property, measure_id, date_time,
                     value, quality, completeness)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (measure_id, date_time) DO NOTHING",
            )?;
            for row in rows {
                let outcome = stmt.execute(params![
                    row.station_id,
                    row.observed_property,
                    row.measure_id,
                    row.date_time,
                    row.value,
                    row.quality,
                    row.completeness,
                ]);
                match outcome {
                    Ok(n) => inserted += n,
                    Err(e) => {
                        warn!(
                            "skipping measurement measure_id={} date_time={}: {}",
                            row.measure_id, row.date_time, e
                        );
                    }
                }
            }
        }
        tx.commit()?;

        info!(
            "inserted {} new measurements ({} skipped)",
            inserted,
            rows.len() - inserted
        );
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_station() -> StationRecord {
        StationRecord {
            station_id: "E64999A".to_string(),
            label: "Bourne Eau at Eastgate".to_string(),
            lat: 52.768,
            long: -0.366,
            river_name: Some("Bourne Eau".to_string()),
            date_opened: Some("2004-03-17".to_string()),
        }
    }

    fn sample_measurement(date_time: &str) -> MeasurementRecord {
        MeasurementRecord {
            station_id: "E64999A".to_string(),
            observed_property: "conductivity".to_string(),
            measure_id: "E64999A-cond-i-subdaily-uscm".to_string(),
            date_time: date_time.to_string(),
            value: Some(523.0),
            quality: Some("Good".to_string()),
            completeness: Some("Complete".to_string()),
        }
    }

    #[test]
    fn test_open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/data/hydrology.db");
        let store = Store::open(&path).unwrap();
        store.init_schema().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();
        store.init_schema().unwrap();
    }

    #[test]
    fn test_upsert_station_keeps_single_row_and_last_write_wins() {
        let dir = tempdir().unwrap();
        let store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();

        store.upsert_station(&sample_station()).unwrap();
        let mut renamed = sample_station();
        renamed.label = "Bourne Eau at Eastgate (relocated)".to_string();
        store.upsert_station(&renamed).unwrap();

        let (count, label): (i64, String) = store
            .conn
            .query_row(
                "SELECT COUNT(*), MAX(label) FROM stations WHERE station_id = 'E64999A'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(label, "Bourne Eau at Eastgate (relocated)");
    }

    #[test]
    fn test_insert_measurements_counts_only_new_rows() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();
        store.upsert_station(&sample_station()).unwrap();

        let rows = vec![
            sample_measurement("2024-05-01T09:45:00+00:00"),
            sample_measurement("2024-05-01T10:00:00+00:00"),
        ];
        assert_eq!(store.insert_measurements(&rows).unwrap(), 2);

        // Same batch again: every pair already exists.
        assert_eq!(store.insert_measurements(&rows).unwrap(), 0);

        // One old, one genuinely new.
        let mixed = vec![
            sample_measurement("2024-05-01T10:00:00+00:00"),
            sample_measurement("2024-05-01T10:15:00+00:00"),
        ];
        assert_eq!(store.insert_measurements(&mixed).unwrap(), 1);

        let total: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM measurements", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_duplicate_within_one_batch_inserts_once() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();
        store.upsert_station(&sample_station()).unwrap();

        let rows = vec![
            sample_measurement("2024-05-01T10:00:00+00:00"),
            sample_measurement("2024-05-01T10:00:00+00:00"),
        ];
        assert_eq!(store.insert_measurements(&rows).unwrap(), 1);
    }

    #[test]
    fn test_measurement_for_unknown_station_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();

        // No station row at all: the foreign key rejects the insert but the
        // batch still succeeds with zero inserted.
        let rows = vec![sample_measurement("2024-05-01T10:00:00+00:00")];
        assert_eq!(store.insert_measurements(&rows).unwrap(), 0);
    }

    #[test]
    fn test_null_value_round_trips_as_null() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();
        store.upsert_station(&sample_station()).unwrap();

        let mut row = sample_measurement("2024-05-01T10:00:00+00:00");
        row.value = None;
        row.quality = Some("Missing".to_string());
        store.insert_measurements(&[row]).unwrap();

        let stored: Option<f64> = store
            .conn
            .query_row(
                "SELECT value FROM measurements WHERE date_time = '2024-05-01T10:00:00+00:00'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(stored, None);
    }

    #[test]
    fn test_empty_batch_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("h.db")).unwrap();
        store.init_schema().unwrap();
        assert_eq!(store.insert_measurements(&[]).unwrap(), 0);
    }
}
