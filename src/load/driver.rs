use super::report::{DatasetReport, RunReport};
use super::OnError;
use crate::discovery::{find_files, JSON_EXTENSION};
use crate::error::EtlError;
use crate::store::WarehouseStore;
use crate::transform::{EventTransformer, SongTransformer, Transformer};
use std::path::Path;
use tracing::{error, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadSettings {
    pub on_error: OnError,
    /// Maximum number of rows per `insert_batch` call.
    pub batch_size: usize,
}

impl Default for LoadSettings {
    fn default() -> Self {
        LoadSettings {
            on_error: OnError::Abort,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Walks a dataset tree and loads it file by file, one transaction per file.
pub struct LoadDriver<'a> {
    store: &'a mut dyn WarehouseStore,
    settings: LoadSettings,
}

impl<'a> LoadDriver<'a> {
    pub fn new(store: &'a mut dyn WarehouseStore, settings: LoadSettings) -> Self {
        LoadDriver { store, settings }
    }

    /// Discovers every JSON file under `root` and loads it with
    /// `transformer`, committing after each file.
    pub fn process_data(
        &mut self,
        root: &Path,
        transformer: &dyn Transformer,
    ) -> Result<DatasetReport, EtlError> {
        let files = find_files(root, JSON_EXTENSION)?;
        let total = files.len();
        info!("{} files found in {}", total, root.display());

        let mut report = DatasetReport::new(transformer.dataset(), root.to_path_buf(), total);
        for (i, path) in files.iter().enumerate() {
            match self.process_file(path, transformer) {
                Ok(rows) => {
                    report.files_processed += 1;
                    report.rows_loaded += rows;
                    info!("{}/{} files processed.", i + 1, total);
                }
                Err(err) if self.settings.on_error == OnError::SkipFile && err.is_file_scoped() => {
                    report.files_skipped += 1;
                    warn!("Skipping {}: {}", path.display(), err);
                }
                Err(err) => {
                    error!(
                        "Aborting {} after {} of {} files: {}",
                        report.dataset, report.files_processed, total, err
                    );
                    return Err(err);
                }
            }
        }
        Ok(report)
    }

    /// Loads one file. Returns the number of rows handed to the store.
    ///
    /// The transformer runs before the transaction opens so its lookups only
    /// see committed data. Any failure after `begin` rolls the file back.
    pub fn process_file(
        &mut self,
        path: &Path,
        transformer: &dyn Transformer,
    ) -> Result<usize, EtlError> {
        let rows = transformer.transform(path, &*self.store)?;

        self.store.begin()?;
        let written = rows
            .chunks(self.settings.batch_size.max(1))
            .try_for_each(|batch| self.store.insert_batch(batch))
            .and_then(|_| self.store.commit());

        if let Err(err) = written {
            if let Err(rollback_err) = self.store.rollback() {
                error!(
                    "Rollback of {} failed: {}",
                    path.display(),
                    rollback_err
                );
            }
            return Err(err.into());
        }
        Ok(rows.len())
    }
}

/// Full run: song data first so that log events can resolve their songs,
/// then log data.
pub fn run_etl(
    store: &mut dyn WarehouseStore,
    settings: LoadSettings,
    song_data_root: &Path,
    log_data_root: &Path,
) -> Result<RunReport, EtlError> {
    let mut driver = LoadDriver::new(store, settings);

    let song_data = driver.process_data(song_data_root, &SongTransformer)?;
    info!("{}", song_data);

    let log_data = driver.process_data(log_data_root, &EventTransformer)?;
    info!("{}", log_data);

    Ok(RunReport {
        song_data,
        log_data,
    })
}
