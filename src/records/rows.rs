/// A row of the `songs` dimension table.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

/// A row of the `artists` dimension table.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A row of the `time` dimension table, see [`super::TimeRow::from_instant`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: String,
    pub hour: u32,
    pub day: u32,
    /// ISO-8601 week number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: u32,
}

/// A row of the `users` dimension table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// A row of the `songplays` fact table. The generated `songplay_id` is
/// assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct SongplayRow {
    pub start_time: String,
    pub user_id: String,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// A typed row destined to one of the star schema tables.
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Song(SongRow),
    Artist(ArtistRow),
    Time(TimeRow),
    User(UserRow),
    Songplay(SongplayRow),
}

impl Row {
    pub fn table(&self) -> &'static str {
        match self {
            Row::Song(_) => "songs",
            Row::Artist(_) => "artists",
            Row::Time(_) => "time",
            Row::User(_) => "users",
            Row::Songplay(_) => "songplays",
        }
    }
}

/// Per-table row counts of a store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}
