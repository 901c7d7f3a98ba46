use super::{read_input, Transformer};
use crate::error::EtlError;
use crate::records::{Row, SongRecord};
use crate::store::WarehouseStore;
use std::path::Path;

/// Song-data files: one JSON object per file, yielding a song row and an
/// artist row.
#[derive(Debug, Default, Clone, Copy)]
pub struct SongTransformer;

impl SongTransformer {
    pub fn parse(path: &Path, content: &str) -> Result<Vec<Row>, EtlError> {
        let record: SongRecord = serde_json::from_str(content)
            .map_err(|e| EtlError::malformed(path, None, e.to_string()))?;
        record
            .validate()
            .map_err(|reason| EtlError::malformed(path, None, reason))?;
        Ok(vec![
            Row::Song(record.song_row()),
            Row::Artist(record.artist_row()),
        ])
    }
}

impl Transformer for SongTransformer {
    fn dataset(&self) -> &'static str {
        "song_data"
    }

    fn transform(&self, path: &Path, _store: &dyn WarehouseStore) -> Result<Vec<Row>, EtlError> {
        let content = read_input(path)?;
        Self::parse(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryWarehouseStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn emits_song_then_artist() {
        let content = r#"{"song_id":"S1","title":"Test Song","artist_id":"A1","artist_name":"Tester","artist_location":"","artist_latitude":null,"artist_longitude":null,"year":2020,"duration":123.45}"#;
        let rows = SongTransformer::parse(Path::new("/s.json"), content).unwrap();

        assert_eq!(rows.len(), 2);
        match (&rows[0], &rows[1]) {
            (Row::Song(song), Row::Artist(artist)) => {
                assert_eq!(song.song_id, "S1");
                assert_eq!(song.artist_id, "A1");
                assert_eq!(artist.artist_id, "A1");
                assert_eq!(artist.name, "Tester");
                assert_eq!(artist.location.as_deref(), Some(""));
            }
            other => panic!("unexpected rows {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let err = SongTransformer::parse(Path::new("/bad.json"), "{\"song_id\": ").unwrap_err();
        match err {
            EtlError::MalformedRecord { path, line, .. } => {
                assert_eq!(path, Path::new("/bad.json"));
                assert_eq!(line, None);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song.json");
        fs::write(
            &path,
            r#"{"song_id":"S2","title":"T","artist_id":"A2","artist_name":"N","year":0,"duration":1.5}"#,
        )
        .unwrap();

        let store = MemoryWarehouseStore::new();
        let rows = SongTransformer.transform(&path, &store).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].table(), "songs");
        assert_eq!(rows[1].table(), "artists");
    }

    #[test]
    fn non_utf8_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song.json");
        fs::write(&path, b"{\"song_id\":\"\xff\"}").unwrap();

        let store = MemoryWarehouseStore::new();
        let err = SongTransformer.transform(&path, &store).unwrap_err();
        assert!(matches!(err, EtlError::MalformedRecord { line: None, .. }));
        assert!(err.is_file_scoped());
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let store = MemoryWarehouseStore::new();
        let err = SongTransformer
            .transform(Path::new("/definitely/not/here.json"), &store)
            .unwrap_err();
        assert!(matches!(err, EtlError::Filesystem { .. }));
    }
}
