use super::{ArtistRow, SongRow};
use serde::Deserialize;

/// One song-data file: a song and its performing artist.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub year: i32,
    pub duration: f64,
}

impl SongRecord {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.song_id.trim().is_empty() {
            return Err("empty song_id".to_string());
        }
        if self.artist_id.trim().is_empty() {
            return Err("empty artist_id".to_string());
        }
        Ok(())
    }

    pub fn song_row(&self) -> SongRow {
        SongRow {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    pub fn artist_row(&self) -> ArtistRow {
        ArtistRow {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SONG_JSON: &str = r#"{"num_songs": 1, "artist_id": "ARD7TVE1187B99BFB1", "artist_latitude": null, "artist_longitude": null, "artist_location": "California - LA", "artist_name": "Casual", "song_id": "SOMZWCG12A8C13C480", "title": "I Didn't Mean To", "duration": 218.93179, "year": 0}"#;

    #[test]
    fn parses_song_file() {
        let record: SongRecord = serde_json::from_str(SONG_JSON).unwrap();
        record.validate().unwrap();

        assert_eq!(
            record.song_row(),
            SongRow {
                song_id: "SOMZWCG12A8C13C480".to_string(),
                title: "I Didn't Mean To".to_string(),
                artist_id: "ARD7TVE1187B99BFB1".to_string(),
                year: 0,
                duration: 218.93179,
            }
        );
        let artist = record.artist_row();
        assert_eq!(artist.name, "Casual");
        assert_eq!(artist.location.as_deref(), Some("California - LA"));
        assert_eq!(artist.latitude, None);
        assert_eq!(artist.longitude, None);
    }

    #[test]
    fn missing_required_key_fails_to_parse() {
        let json = r#"{"artist_id": "A1", "artist_name": "X", "title": "T", "duration": 1.0, "year": 1}"#;
        let err = serde_json::from_str::<SongRecord>(json).unwrap_err();
        assert!(err.to_string().contains("song_id"));
    }

    #[test]
    fn empty_ids_are_rejected() {
        let json = r#"{"song_id": "", "artist_id": "A1", "artist_name": "X", "title": "T", "duration": 1.0, "year": 1}"#;
        let record: SongRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.validate(), Err("empty song_id".to_string()));

        let json = r#"{"song_id": "S1", "artist_id": " ", "artist_name": "X", "title": "T", "duration": 1.0, "year": 1}"#;
        let record: SongRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.validate(), Err("empty artist_id".to_string()));
    }

    #[test]
    fn missing_artist_or_duration_fails_to_parse() {
        let json = r#"{"song_id": "S1", "artist_name": "X", "title": "T", "duration": 1.0, "year": 1}"#;
        let err = serde_json::from_str::<SongRecord>(json).unwrap_err();
        assert!(err.to_string().contains("artist_id"));

        let json = r#"{"song_id": "S1", "artist_id": "A1", "artist_name": "X", "title": "T", "year": 1}"#;
        let err = serde_json::from_str::<SongRecord>(json).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }
}
