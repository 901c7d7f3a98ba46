//! Typed input records and the rows derived from them.

mod event;
mod rows;
mod song;
mod time;

pub use event::{LogLine, PlayEvent, NEXT_SONG_PAGE};
pub use rows::{ArtistRow, Row, SongRow, SongplayRow, TableCounts, TimeRow, UserRow};
pub use song::SongRecord;
pub use time::{format_start_time, instant_from_millis, START_TIME_FORMAT};
