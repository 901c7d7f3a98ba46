//! SQLite-backed warehouse store.

use super::schema::{
    ARTIST_INSERT, SONGPLAY_INSERT, SONG_INSERT, SONG_SELECT, TIME_INSERT, USER_INSERT,
    WAREHOUSE_VERSIONED_SCHEMAS,
};
use super::trait_def::{SongMatch, WarehouseStore};
use crate::error::PersistenceError;
use crate::records::{Row, TableCounts};
use crate::sqlite_persistence::migrate_if_needed;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteWarehouseStore {
    conn: Connection,
}

impl SqliteWarehouseStore {
    /// Opens the warehouse database at `db_path`, creating the file and the
    /// schema when missing and validating the schema otherwise.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, PersistenceError> {
        let mut conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        migrate_if_needed(&mut conn, WAREHOUSE_VERSIONED_SCHEMAS)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let store = SqliteWarehouseStore { conn };
        let counts = store.counts()?;
        info!(
            "Opened warehouse at {:?}: {} songs, {} artists, {} users, {} songplays",
            db_path.as_ref(),
            counts.songs,
            counts.artists,
            counts.users,
            counts.songplays
        );
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let mut conn = Connection::open_in_memory()?;
        migrate_if_needed(&mut conn, WAREHOUSE_VERSIONED_SCHEMAS)?;
        Ok(SqliteWarehouseStore { conn })
    }

    /// Direct access for ad-hoc queries in tests and tooling.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    fn insert_row(&self, row: &Row) -> rusqlite::Result<usize> {
        match row {
            Row::Song(song) => self.conn.prepare_cached(SONG_INSERT)?.execute(params![
                song.song_id,
                song.title,
                song.artist_id,
                song.year,
                song.duration
            ]),
            Row::Artist(artist) => self.conn.prepare_cached(ARTIST_INSERT)?.execute(params![
                artist.artist_id,
                artist.name,
                artist.location,
                artist.latitude,
                artist.longitude
            ]),
            Row::Time(time) => self.conn.prepare_cached(TIME_INSERT)?.execute(params![
                time.start_time,
                time.hour,
                time.day,
                time.week,
                time.month,
                time.year,
                time.weekday
            ]),
            Row::User(user) => self.conn.prepare_cached(USER_INSERT)?.execute(params![
                user.user_id,
                user.first_name,
                user.last_name,
                user.gender,
                user.level
            ]),
            Row::Songplay(play) => self.conn.prepare_cached(SONGPLAY_INSERT)?.execute(params![
                play.start_time,
                play.user_id,
                play.level,
                play.song_id,
                play.artist_id,
                play.session_id,
                play.location,
                play.user_agent
            ]),
        }
    }

    fn count(&self, table: &str) -> Result<usize, PersistenceError> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

impl WarehouseStore for SqliteWarehouseStore {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        if self.in_transaction() {
            return Err(PersistenceError::Transaction(
                "a transaction is already open".to_string(),
            ));
        }
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(())
    }

    fn insert_batch(&mut self, rows: &[Row]) -> Result<(), PersistenceError> {
        if !self.in_transaction() {
            return Err(PersistenceError::Transaction(
                "insert outside of a transaction".to_string(),
            ));
        }
        let mut written = 0;
        for row in rows {
            written += self.insert_row(row)?;
        }
        debug!("Batch of {} rows, {} written", rows.len(), written);
        Ok(())
    }

    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, PersistenceError> {
        if self.in_transaction() {
            return Err(PersistenceError::Transaction(
                "song lookup inside an open transaction".to_string(),
            ));
        }
        let found = self
            .conn
            .prepare_cached(SONG_SELECT)?
            .query_row(params![title, artist_name, duration], |row| {
                Ok(SongMatch {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            })
            .optional()?;
        Ok(found)
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        if !self.in_transaction() {
            return Err(PersistenceError::Transaction(
                "commit without an open transaction".to_string(),
            ));
        }
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        if self.in_transaction() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn counts(&self) -> Result<TableCounts, PersistenceError> {
        Ok(TableCounts {
            songs: self.count("songs")?,
            artists: self.count("artists")?,
            time: self.count("time")?,
            users: self.count("users")?,
            songplays: self.count("songplays")?,
        })
    }

    fn close(mut self) -> Result<(), PersistenceError> {
        self.rollback()?;
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
