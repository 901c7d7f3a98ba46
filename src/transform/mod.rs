//! Turning one input file into typed rows.

mod event_transformer;
mod song_transformer;

pub use event_transformer::EventTransformer;
pub use song_transformer::SongTransformer;

use crate::error::EtlError;
use crate::records::Row;
use crate::store::WarehouseStore;
use std::path::Path;

/// Produces the rows of a single input file.
pub trait Transformer {
    /// Short dataset label used in logs and reports.
    fn dataset(&self) -> &'static str;

    /// Reads `path` and returns its rows in insertion order.
    ///
    /// `store` is only read from, and only for committed data: the driver
    /// calls this before opening the file's transaction.
    fn transform(&self, path: &Path, store: &dyn WarehouseStore) -> Result<Vec<Row>, EtlError>;
}

/// Reads a whole input file. Content that is not UTF-8 is malformed, any
/// other I/O failure is a filesystem error.
fn read_input(path: &Path) -> Result<String, EtlError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => EtlError::malformed(path, None, e.to_string()),
        _ => EtlError::filesystem(path, e),
    })
}
