//! In-memory warehouse store.
//!
//! Mirrors the conflict policy of the SQLite store with plain maps. A
//! transaction works on a copy of the committed tables, commit swaps it in
//! and rollback drops it. Failures can be scripted with
//! [`MemoryWarehouseStore::fail_on_insert`].

use super::trait_def::{SongMatch, WarehouseStore};
use crate::error::PersistenceError;
use crate::records::{ArtistRow, Row, SongRow, SongplayRow, TableCounts, TimeRow, UserRow};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryTables {
    pub songs: BTreeMap<String, SongRow>,
    pub artists: BTreeMap<String, ArtistRow>,
    pub time: BTreeMap<String, TimeRow>,
    pub users: BTreeMap<String, UserRow>,
    pub songplays: Vec<SongplayRow>,
}

impl MemoryTables {
    fn apply(&mut self, row: &Row) {
        match row {
            Row::Song(song) => {
                self.songs
                    .entry(song.song_id.clone())
                    .or_insert_with(|| song.clone());
            }
            Row::Artist(artist) => {
                self.artists
                    .entry(artist.artist_id.clone())
                    .or_insert_with(|| artist.clone());
            }
            Row::Time(time) => {
                self.time
                    .entry(time.start_time.clone())
                    .or_insert_with(|| time.clone());
            }
            Row::User(user) => {
                self.users
                    .entry(user.user_id.clone())
                    .and_modify(|existing| {
                        if user.level.is_some() {
                            existing.level = user.level.clone();
                        }
                    })
                    .or_insert_with(|| user.clone());
            }
            Row::Songplay(play) => {
                let exists = self.songplays.iter().any(|p| {
                    p.start_time == play.start_time
                        && p.user_id == play.user_id
                        && p.session_id == play.session_id
                });
                if !exists {
                    self.songplays.push(play.clone());
                }
            }
        }
    }

    fn counts(&self) -> TableCounts {
        TableCounts {
            songs: self.songs.len(),
            artists: self.artists.len(),
            time: self.time.len(),
            users: self.users.len(),
            songplays: self.songplays.len(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryWarehouseStore {
    committed: MemoryTables,
    pending: Option<MemoryTables>,
    rows_seen: usize,
    fail_on_insert: Option<usize>,
    commits: usize,
    rollbacks: usize,
}

impl MemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `n`-th row handed to `insert_batch` (1-based, counted over
    /// the store's lifetime) fail.
    pub fn fail_on_insert(mut self, n: usize) -> Self {
        self.fail_on_insert = Some(n);
        self
    }

    pub fn tables(&self) -> &MemoryTables {
        &self.committed
    }

    /// Number of successful commits.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Number of rollbacks that discarded an open transaction.
    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }
}

impl WarehouseStore for MemoryWarehouseStore {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        if self.pending.is_some() {
            return Err(PersistenceError::Transaction(
                "a transaction is already open".to_string(),
            ));
        }
        self.pending = Some(self.committed.clone());
        Ok(())
    }

    fn insert_batch(&mut self, rows: &[Row]) -> Result<(), PersistenceError> {
        let pending = self.pending.as_mut().ok_or_else(|| {
            PersistenceError::Transaction("insert outside of a transaction".to_string())
        })?;
        for row in rows {
            self.rows_seen += 1;
            if self.fail_on_insert == Some(self.rows_seen) {
                return Err(PersistenceError::Injected(format!(
                    "insert #{} into {}",
                    self.rows_seen,
                    row.table()
                )));
            }
            pending.apply(row);
        }
        Ok(())
    }

    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, PersistenceError> {
        if self.pending.is_some() {
            return Err(PersistenceError::Transaction(
                "song lookup inside an open transaction".to_string(),
            ));
        }
        let found = self.committed.songs.values().find(|song| {
            song.title == title
                && song.duration == duration
                && self
                    .committed
                    .artists
                    .get(&song.artist_id)
                    .is_some_and(|artist| artist.name == artist_name)
        });
        Ok(found.map(|song| SongMatch {
            song_id: song.song_id.clone(),
            artist_id: song.artist_id.clone(),
        }))
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        let pending = self.pending.take().ok_or_else(|| {
            PersistenceError::Transaction("commit without an open transaction".to_string())
        })?;
        self.committed = pending;
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        if self.pending.take().is_some() {
            self.rollbacks += 1;
        }
        Ok(())
    }

    fn counts(&self) -> Result<TableCounts, PersistenceError> {
        Ok(self.committed.counts())
    }

    fn close(self) -> Result<(), PersistenceError> {
        Ok(())
    }
}
