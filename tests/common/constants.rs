//! Shared constants for end-to-end tests
//!
//! When the fixture data changes, update only this file.

// ============================================================================
// Song catalog
// ============================================================================

pub const SONG_1_ID: &str = "S1";
pub const SONG_1_TITLE: &str = "Test Song";
pub const SONG_1_DURATION: f64 = 123.45;

pub const SONG_2_ID: &str = "S2";
pub const SONG_2_TITLE: &str = "Second Song";
pub const SONG_2_DURATION: f64 = 201.0;

pub const ARTIST_1_ID: &str = "A1";
pub const ARTIST_1_NAME: &str = "Tester";

// ============================================================================
// Activity
// ============================================================================

pub const USER_ID: &str = "7";

pub const SESSION_ID: i64 = 139;

/// 2018-11-02 01:25:34.796 UTC
pub const PLAY_TS: i64 = 1541121934796;
pub const PLAY_START_TIME: &str = "2018-11-02 01:25:34.796";
