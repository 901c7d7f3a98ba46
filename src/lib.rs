//! Songplay ETL Library
//!
//! Loads song metadata files and listening activity logs into a star-schema
//! warehouse. The modules are exposed for the binary and for integration tests.

pub mod config;
pub mod discovery;
pub mod error;
pub mod load;
pub mod records;
pub mod sqlite_persistence;
pub mod store;
pub mod transform;

// Re-export commonly used types for convenience
pub use error::{EtlError, PersistenceError};
pub use load::{run_etl, DatasetReport, LoadDriver, LoadSettings, OnError, RunReport};
pub use store::{MemoryWarehouseStore, SqliteWarehouseStore, WarehouseStore};
