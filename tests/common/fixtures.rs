//! Dataset trees written to temporary directories.

use super::constants::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding both dataset roots and a database path.
pub struct TestDataset {
    pub dir: TempDir,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub db_path: PathBuf,
}

impl TestDataset {
    /// Creates empty song and log roots.
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).unwrap();
        fs::create_dir_all(&log_data).unwrap();
        let db_path = dir.path().join("warehouse.db");
        TestDataset {
            dir,
            song_data,
            log_data,
            db_path,
        }
    }

    /// One song file for S1 by A1 and one log file with a single matching
    /// NextSong event by user 7.
    pub fn single_play() -> Self {
        let dataset = Self::empty();
        dataset.write_song("A/A/A/TRAAAAA.json", &song_json(SONG_1_ID, SONG_1_TITLE, SONG_1_DURATION));
        dataset.write_log(
            "2018/11/2018-11-02-events.json",
            &[next_song_event(SONG_1_TITLE, ARTIST_1_NAME, SONG_1_DURATION, USER_ID, "free", PLAY_TS)],
        );
        dataset
    }

    pub fn write_song(&self, relative: &str, record: &Value) {
        write_file(&self.song_data.join(relative), &record.to_string());
    }

    pub fn write_log(&self, relative: &str, events: &[Value]) {
        let content: String = events.iter().map(|e| format!("{}\n", e)).collect();
        write_file(&self.log_data.join(relative), &content);
    }

    pub fn write_raw_log(&self, relative: &str, content: &str) {
        write_file(&self.log_data.join(relative), content);
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A song-data record by artist A1.
pub fn song_json(song_id: &str, title: &str, duration: f64) -> Value {
    json!({
        "num_songs": 1,
        "song_id": song_id,
        "title": title,
        "artist_id": ARTIST_1_ID,
        "artist_name": ARTIST_1_NAME,
        "artist_location": "",
        "artist_latitude": null,
        "artist_longitude": null,
        "year": 2020,
        "duration": duration,
    })
}

pub fn next_song_event(
    song: &str,
    artist: &str,
    length: f64,
    user_id: &str,
    level: &str,
    ts: i64,
) -> Value {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Ada",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Lovelace",
        "length": length,
        "level": level,
        "location": "London",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540919166796.0,
        "sessionId": SESSION_ID,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id,
    })
}

/// A non-playback event, e.g. "Home" or "Logout".
pub fn page_event(page: &str, user_id: &str, ts: i64) -> Value {
    json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": "Ada",
        "gender": "F",
        "lastName": "Lovelace",
        "length": null,
        "level": "free",
        "page": page,
        "sessionId": SESSION_ID,
        "song": null,
        "ts": ts,
        "userId": user_id,
    })
}
