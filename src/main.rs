//! Hydrology ETL - Environment Agency Hydrology API to SQLite.
//!
//! One invocation is one sequential run:
//! 1. Fetch station metadata and upsert the station row
//! 2. Resolve measure ids for conductivity and dissolved oxygen
//! 3. Fetch the latest readings per parameter, normalize, insert-or-skip
//!
//! Re-running is always safe: stations upsert in place and measurements
//! dedup on (measure_id, date_time).
//!
//! Usage:
//!   cargo run --release                          # defaults: E64999A, 10 readings
//!   cargo run --release -- --station E64999A --limit 25 --db data/hydrology.db
//!   cargo run --release -- --params conductivity --params dissolved-oxygen
//!
//! Environment:
//!   HYDROLOGY_BASE_URL - overrides the production API base (honours .env)
//!   RUST_LOG           - log filter, defaults to info

use std::path::PathBuf;

use argh::FromArgs;
use log::error;

use hydro_etl::config::{
    DEFAULT_DB_PATH, DEFAULT_LIMIT, DEFAULT_STATION_NOTATION, DEFAULT_TIMEOUT_SECS, RunConfig,
};
use hydro_etl::pipeline;

#[derive(FromArgs, Debug)]
/// Pull the latest water-quality readings for one station into SQLite.
struct Args {
    /// station notation to ingest (default: E64999A)
    #[argh(option, default = "DEFAULT_STATION_NOTATION.to_string()")]
    station: String,

    /// path to the SQLite database (default: data/hydrology.db)
    #[argh(option, default = "PathBuf::from(DEFAULT_DB_PATH)")]
    db: PathBuf,

    /// number of latest readings to fetch per parameter (default: 10)
    #[argh(option, default = "DEFAULT_LIMIT")]
    limit: u32,

    /// observed parameter, pass twice; defaults to conductivity and
    /// dissolved-oxygen
    #[argh(option)]
    params: Vec<String>,

    /// per-request timeout in seconds (default: 30)
    #[argh(option, default = "DEFAULT_TIMEOUT_SECS")]
    timeout: u64,
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Args = argh::from_env();
    let cfg = RunConfig::new(args.station, args.params, args.limit, args.db, args.timeout);

    match pipeline::run(&cfg) {
        Ok(summary) => {
            for (param, count) in &summary.inserted {
                println!("Inserted {} new {} measurements", count, param);
            }
            println!(
                "Done: station={} total_inserted={} db={}",
                summary.station_id,
                summary.total_inserted(),
                cfg.db_path.display()
            );
            if summary.had_failures() {
                for (param, cause) in &summary.failures {
                    eprintln!("Failed: {}: {}", param, cause);
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("pipeline execution failed: {}", e);
            eprintln!("Pipeline failed: {}", e);
            std::process::exit(1);
        }
    }
}
