use super::{read_input, Transformer};
use crate::error::EtlError;
use crate::records::{LogLine, PlayEvent, Row};
use crate::store::WarehouseStore;
use std::path::Path;
use tracing::debug;

/// Log-data files: newline-delimited JSON events.
///
/// Only "NextSong" events are kept. The rows come out grouped by table:
/// every time row, then every user row, then every songplay row.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventTransformer;

impl EventTransformer {
    /// Parses every non-blank line and keeps the validated plays.
    pub fn parse_plays(path: &Path, content: &str) -> Result<Vec<PlayEvent>, EtlError> {
        let mut plays = Vec::new();
        let mut skipped = 0;
        for (index, raw_line) in content.lines().enumerate() {
            if raw_line.trim().is_empty() {
                continue;
            }
            let line_number = Some(index + 1);
            let line: LogLine = serde_json::from_str(raw_line)
                .map_err(|e| EtlError::malformed(path, line_number, e.to_string()))?;
            if !line.is_next_song() {
                skipped += 1;
                continue;
            }
            let play = line
                .into_play_event()
                .map_err(|reason| EtlError::malformed(path, line_number, reason))?;
            plays.push(play);
        }
        debug!(
            "{}: {} plays, {} other events",
            path.display(),
            plays.len(),
            skipped
        );
        Ok(plays)
    }

    /// Builds the rows of `plays`, resolving song and artist ids in `store`.
    pub fn rows(plays: &[PlayEvent], store: &dyn WarehouseStore) -> Result<Vec<Row>, EtlError> {
        let mut rows = Vec::with_capacity(plays.len() * 3);
        rows.extend(plays.iter().map(|play| Row::Time(play.time_row())));
        rows.extend(plays.iter().map(|play| Row::User(play.user_row())));
        for play in plays {
            let found = match (&play.song, &play.artist, play.length) {
                (Some(song), Some(artist), Some(length)) => store.find_song(song, artist, length)?,
                _ => None,
            };
            let (song_id, artist_id) = match found {
                Some(m) => (Some(m.song_id), Some(m.artist_id)),
                None => (None, None),
            };
            rows.push(Row::Songplay(play.songplay_row(song_id, artist_id)));
        }
        Ok(rows)
    }
}

impl Transformer for EventTransformer {
    fn dataset(&self) -> &'static str {
        "log_data"
    }

    fn transform(&self, path: &Path, store: &dyn WarehouseStore) -> Result<Vec<Row>, EtlError> {
        let content = read_input(path)?;
        let plays = Self::parse_plays(path, &content)?;
        Self::rows(&plays, store)
    }
}
