//! WarehouseStore trait definition.
//!
//! The load driver talks to the database only through this trait, so the
//! SQLite store and the in-memory store are interchangeable.

use crate::error::PersistenceError;
use crate::records::{Row, TableCounts};

/// Ids of a catalog song matched by a play event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Trait for warehouse storage backends.
pub trait WarehouseStore {
    /// Starts the transaction that will hold one file's rows.
    /// Fails if a transaction is already open.
    fn begin(&mut self) -> Result<(), PersistenceError>;

    /// Writes `rows` in order inside the open transaction.
    ///
    /// Songs, artists and time rows that already exist are left untouched,
    /// an existing user only gets its `level` updated (a missing level keeps
    /// the stored one), and a songplay with an existing
    /// (start_time, user_id, session_id) is skipped, a missing session_id
    /// matching another missing one.
    fn insert_batch(&mut self, rows: &[Row]) -> Result<(), PersistenceError>;

    /// Finds the song whose title, artist name and duration all match
    /// exactly.
    ///
    /// Only committed data is visible, so this fails while a transaction is
    /// open.
    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, PersistenceError>;

    fn commit(&mut self) -> Result<(), PersistenceError>;

    /// Discards the open transaction. A no-op when none is open.
    fn rollback(&mut self) -> Result<(), PersistenceError>;

    /// Number of rows per table, meant to be read between transactions.
    fn counts(&self) -> Result<TableCounts, PersistenceError>;

    /// Releases the underlying resources, discarding any open transaction.
    fn close(self) -> Result<(), PersistenceError>
    where
        Self: Sized;
}
