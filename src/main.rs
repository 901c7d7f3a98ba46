use anyhow::{Context, Result};
use clap::Parser;
use songplay_etl::config::{self, DEFAULT_DB_PATH, DEFAULT_LOG_DATA_DIR, DEFAULT_SONG_DATA_DIR};
use songplay_etl::load::DEFAULT_BATCH_SIZE;
use songplay_etl::{run_etl, OnError, SqliteWarehouseStore, WarehouseStore};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Makes `s` absolute. Paths that don't exist yet, like a new database file,
/// are joined to the working directory as given.
fn parse_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(std::env::current_dir()?.join(path))
        }
        Err(e) => Err(e).with_context(|| format!("Error resolving path: {}", s)),
    }
}

#[derive(Parser, Debug)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH")))]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database. Created with the schema if missing.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Root of the song metadata tree.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_SONG_DATA_DIR)]
    pub song_data: PathBuf,

    /// Root of the activity log tree.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_LOG_DATA_DIR)]
    pub log_data: PathBuf,

    /// What to do when a single file fails to load.
    #[clap(long, value_enum, default_value = "abort")]
    pub on_error: OnError,

    /// Maximum number of rows per insert batch.
    #[clap(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            song_data_dir: args.song_data.clone(),
            log_data_dir: args.log_data.clone(),
            on_error: args.on_error,
            batch_size: args.batch_size,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_path: {:?}", app_config.db_path);
    info!("  song_data: {:?}", app_config.song_data_dir);
    info!("  log_data: {:?}", app_config.log_data_dir);
    info!("  on_error: {:?}", app_config.on_error);

    if !app_config.db_path.exists() {
        info!("Creating new warehouse database at {:?}", app_config.db_path);
    }
    let mut store = SqliteWarehouseStore::open(&app_config.db_path)
        .with_context(|| format!("Failed to open warehouse at {:?}", app_config.db_path))?;

    let result = run_etl(
        &mut store,
        app_config.load_settings(),
        &app_config.song_data_dir,
        &app_config.log_data_dir,
    );

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            error!("ETL run failed: {}", err);
            if let Err(close_err) = store.close() {
                error!("Failed to close warehouse: {}", close_err);
            }
            return Err(err.into());
        }
    };

    let counts = store.counts()?;
    info!(
        "Warehouse now holds {} songs, {} artists, {} time rows, {} users, {} songplays",
        counts.songs, counts.artists, counts.time, counts.users, counts.songplays
    );
    if report.files_skipped() > 0 {
        info!("{} files were skipped, see warnings above", report.files_skipped());
    }
    store.close()?;
    Ok(())
}
