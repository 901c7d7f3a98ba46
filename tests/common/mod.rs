//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::{next_song_event, page_event, song_json, TestDataset};

use songplay_etl::{run_etl, LoadSettings, RunReport, SqliteWarehouseStore, WarehouseStore};

/// Runs the full load against a fresh connection to the dataset's database.
pub fn run_sqlite(dataset: &TestDataset, settings: LoadSettings) -> RunReport {
    let mut store = SqliteWarehouseStore::open(&dataset.db_path).unwrap();
    let report = run_etl(&mut store, settings, &dataset.song_data, &dataset.log_data).unwrap();
    store.close().unwrap();
    report
}
