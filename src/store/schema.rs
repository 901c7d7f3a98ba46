//! Star schema of the warehouse database.
//!
//! Four dimension tables (songs, artists, time, users) around the
//! `songplays` fact table. Dimension keys are the natural ids found in the
//! input data, `songplays` gets a generated integer key.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist_id", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration", &SqlType::Real),
    ],
    indices: &[("idx_songs_title", "title")],
    unique_constraints: &[],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
    unique_constraints: &[],
};

const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", &SqlType::Text, is_primary_key = true),
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true), // ISO-8601
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Integer, non_null = true), // 0 = Monday
    ],
    indices: &[],
    unique_constraints: &[],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text),
    ],
    indices: &[],
    unique_constraints: &[],
};

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("start_time", &SqlType::Text, non_null = true),
        sqlite_column!("user_id", &SqlType::Text, non_null = true),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text),
        sqlite_column!("artist_id", &SqlType::Text),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[
        ("idx_songplays_user", "user_id"),
        ("idx_songplays_song", "song_id"),
    ],
    unique_constraints: &[&["start_time", "user_id", "session_id"]],
};

pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        SONGS_TABLE,
        ARTISTS_TABLE,
        TIME_TABLE,
        USERS_TABLE,
        SONGPLAYS_TABLE,
    ],
    migration: None,
}];

// Conflict policy: dimension rows are write-once except for the user's
// subscription level, songplays are keyed on (start_time, user_id, session_id)
// with a missing session_id matching another missing one.
pub const SONG_INSERT: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT (song_id) DO NOTHING";

pub const ARTIST_INSERT: &str = "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT (artist_id) DO NOTHING";

pub const TIME_INSERT: &str = "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT (start_time) DO NOTHING";

pub const USER_INSERT: &str = "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (user_id) DO UPDATE SET level = COALESCE(excluded.level, users.level)";

pub const SONGPLAY_INSERT: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8 \
     WHERE NOT EXISTS (SELECT 1 FROM songplays \
     WHERE start_time = ?1 AND user_id = ?2 AND session_id IS ?6)";

pub const SONG_SELECT: &str = "SELECT songs.song_id, songs.artist_id FROM songs \
     JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3 \
     ORDER BY songs.song_id LIMIT 1";
