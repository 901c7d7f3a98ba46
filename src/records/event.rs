use super::time::{format_start_time, instant_from_millis};
use super::{SongplayRow, TimeRow, UserRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// The only page value whose events feed the star schema.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One line of an activity log, as written by the app.
///
/// Only `page` is required on every line, the rest depends on the action.
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub page: String,
    pub ts: Option<i64>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub session_id: Option<i64>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// The app writes `userId` as a string, older dumps as a number.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(
        match Option::<TextOrNumber>::deserialize(deserializer)? {
            None => None,
            Some(TextOrNumber::Text(s)) => Some(s),
            Some(TextOrNumber::Integer(n)) => Some(n.to_string()),
            Some(TextOrNumber::Float(f)) if f.fract() == 0.0 => Some((f as i64).to_string()),
            Some(TextOrNumber::Float(f)) => Some(f.to_string()),
        },
    )
}

/// A validated "NextSong" event.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEvent {
    pub started_at: DateTime<Utc>,
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub session_id: Option<i64>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl LogLine {
    pub fn is_next_song(&self) -> bool {
        self.page == NEXT_SONG_PAGE
    }

    /// Converts a "NextSong" line into a [`PlayEvent`].
    ///
    /// A play needs `ts` for its time row and a non-empty `userId` for its
    /// user row. Everything else may be missing and is stored as NULL.
    pub fn into_play_event(self) -> Result<PlayEvent, String> {
        let ts = self.ts.ok_or("missing field `ts`")?;
        let started_at =
            instant_from_millis(ts).ok_or_else(|| format!("timestamp {} out of range", ts))?;
        let user_id = self
            .user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or("missing or empty field `userId`")?;

        Ok(PlayEvent {
            started_at,
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            level: self.level,
            session_id: self.session_id,
            song: self.song,
            artist: self.artist,
            length: self.length,
            location: self.location,
            user_agent: self.user_agent,
        })
    }
}

impl PlayEvent {
    pub fn time_row(&self) -> TimeRow {
        TimeRow::from_instant(&self.started_at)
    }

    pub fn user_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    pub fn songplay_row(&self, song_id: Option<String>, artist_id: Option<String>) -> SongplayRow {
        SongplayRow {
            start_time: format_start_time(&self.started_at),
            user_id: self.user_id.clone(),
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_SONG_LINE: &str = r#"{"artist":"Sydney Youngblood","auth":"Logged In","firstName":"Anabelle","gender":"F","itemInSession":0,"lastName":"Simpson","length":134.47791,"level":"free","location":"Philadelphia-Camden-Wilmington, PA-NJ-DE-MD","method":"PUT","page":"NextSong","registration":1541044398796.0,"sessionId":455,"song":"Ain't No Sunshine","status":200,"ts":1541903636796,"userAgent":"Mozilla\/5.0","userId":"69"}"#;
    const HOME_LINE: &str = r#"{"artist":null,"auth":"Logged Out","firstName":null,"gender":null,"itemInSession":0,"lastName":null,"length":null,"level":"free","location":null,"method":"GET","page":"Home","registration":null,"sessionId":52,"song":null,"status":200,"ts":1541207073796,"userAgent":null,"userId":""}"#;

    #[test]
    fn parses_next_song_line() {
        let line: LogLine = serde_json::from_str(NEXT_SONG_LINE).unwrap();
        assert!(line.is_next_song());

        let event = line.into_play_event().unwrap();
        assert_eq!(event.user_id, "69");
        assert_eq!(event.level.as_deref(), Some("free"));
        assert_eq!(event.session_id, Some(455));
        assert_eq!(event.song.as_deref(), Some("Ain't No Sunshine"));
        assert_eq!(event.length, Some(134.47791));
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn parses_logged_out_line() {
        let line: LogLine = serde_json::from_str(HOME_LINE).unwrap();
        assert!(!line.is_next_song());
        assert_eq!(line.user_id.as_deref(), Some(""));
    }

    #[test]
    fn numeric_user_id_is_accepted() {
        let line: LogLine =
            serde_json::from_str(r#"{"page":"NextSong","userId":7,"ts":0,"level":"paid","sessionId":1}"#)
                .unwrap();
        let event = line.into_play_event().unwrap();
        assert_eq!(event.user_id, "7");
    }

    #[test]
    fn line_without_page_fails_to_parse() {
        let err = serde_json::from_str::<LogLine>(r#"{"userId":"7","ts":0}"#).unwrap_err();
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn play_without_user_is_rejected() {
        let line: LogLine =
            serde_json::from_str(r#"{"page":"NextSong","userId":"","ts":0,"level":"paid","sessionId":1}"#)
                .unwrap();
        assert!(line.into_play_event().unwrap_err().contains("userId"));
    }

    #[test]
    fn play_without_ts_is_rejected() {
        let line: LogLine =
            serde_json::from_str(r#"{"page":"NextSong","userId":"7","level":"free","sessionId":1}"#)
                .unwrap();
        assert!(line.into_play_event().unwrap_err().contains("ts"));
    }

    #[test]
    fn play_with_out_of_range_ts_is_rejected() {
        let line = LogLine {
            page: NEXT_SONG_PAGE.to_string(),
            ts: Some(i64::MAX),
            user_id: Some("7".to_string()),
            ..LogLine::default()
        };
        assert!(line.into_play_event().unwrap_err().contains("out of range"));
    }

    #[test]
    fn play_without_level_or_session_keeps_nulls() {
        let line: LogLine = serde_json::from_str(
            r#"{"page":"NextSong","song":"Test Song","artist":"Tester","length":123.45,"userId":"7","ts":1541121934796}"#,
        )
        .unwrap();
        let event = line.into_play_event().unwrap();
        assert_eq!(event.level, None);
        assert_eq!(event.session_id, None);

        let user = event.user_row();
        assert_eq!(user.user_id, "7");
        assert_eq!(user.level, None);
        let play = event.songplay_row(None, None);
        assert_eq!(play.start_time, "2018-11-02 01:25:34.796");
        assert_eq!(play.level, None);
        assert_eq!(play.session_id, None);
    }

    #[test]
    fn songplay_row_uses_resolved_ids() {
        let line: LogLine = serde_json::from_str(NEXT_SONG_LINE).unwrap();
        let event = line.into_play_event().unwrap();

        let row = event.songplay_row(Some("S1".to_string()), Some("A1".to_string()));
        assert_eq!(row.start_time, event.time_row().start_time);
        assert_eq!(row.song_id.as_deref(), Some("S1"));
        assert_eq!(row.artist_id.as_deref(), Some("A1"));
        assert_eq!(row.session_id, Some(455));

        let row = event.songplay_row(None, None);
        assert!(row.song_id.is_none());
        assert!(row.artist_id.is_none());
    }
}
