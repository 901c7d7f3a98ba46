mod memory_store;
pub mod schema;
mod sqlite_store;
mod trait_def;

pub use memory_store::{MemoryTables, MemoryWarehouseStore};
pub use sqlite_store::SqliteWarehouseStore;
pub use trait_def::{SongMatch, WarehouseStore};
