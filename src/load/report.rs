use std::fmt;
use std::path::PathBuf;

/// Outcome of loading one dataset tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetReport {
    pub dataset: &'static str,
    pub root: PathBuf,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    /// Rows handed to the store, including the ones its conflict policy
    /// turned into no-ops.
    pub rows_loaded: usize,
}

impl DatasetReport {
    pub fn new(dataset: &'static str, root: PathBuf, files_found: usize) -> Self {
        DatasetReport {
            dataset,
            root,
            files_found,
            files_processed: 0,
            files_skipped: 0,
            rows_loaded: 0,
        }
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} files found, {} processed, {} skipped, {} rows loaded",
            self.dataset, self.files_found, self.files_processed, self.files_skipped, self.rows_loaded
        )
    }
}

/// Outcome of a full two-phase run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub song_data: DatasetReport,
    pub log_data: DatasetReport,
}

impl RunReport {
    pub fn files_skipped(&self) -> usize {
        self.song_data.files_skipped + self.log_data.files_skipped
    }
}
