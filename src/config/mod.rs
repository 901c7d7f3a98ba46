mod file_config;

pub use file_config::FileConfig;

use crate::load::{LoadSettings, OnError, DEFAULT_BATCH_SIZE};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA_DIR: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_DIR: &str = "data/log_data";

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    pub on_error: OnError,
    pub batch_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            song_data_dir: PathBuf::from(DEFAULT_SONG_DATA_DIR),
            log_data_dir: PathBuf::from(DEFAULT_LOG_DATA_DIR),
            on_error: OnError::Abort,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    pub on_error: OnError,
    pub batch_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        if db_path.is_dir() {
            bail!("db_path points to a directory: {:?}", db_path);
        }

        let song_data_dir = file
            .song_data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data_dir.clone());
        let log_data_dir = file
            .log_data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data_dir.clone());

        let on_error = match file.on_error {
            Some(s) => parse_on_error(&s).ok_or_else(|| {
                anyhow!("Unknown on_error value {:?}, expected abort or skip-file", s)
            })?,
            None => cli.on_error,
        };

        let batch_size = file.batch_size.unwrap_or(cli.batch_size);
        if batch_size == 0 {
            bail!("batch_size must be at least 1");
        }

        Ok(AppConfig {
            db_path,
            song_data_dir,
            log_data_dir,
            on_error,
            batch_size,
        })
    }

    pub fn load_settings(&self) -> LoadSettings {
        LoadSettings {
            on_error: self.on_error,
            batch_size: self.batch_size,
        }
    }
}

/// Parses an error policy string into OnError.
/// Uses clap's ValueEnum trait for parsing.
fn parse_on_error(s: &str) -> Option<OnError> {
    OnError::from_str(s, true).ok()
}
