//! Two-phase load of the song and log datasets into a warehouse store.

mod driver;
mod report;

pub use driver::{run_etl, LoadDriver, LoadSettings, DEFAULT_BATCH_SIZE};
pub use report::{DatasetReport, RunReport};

/// What the driver does when a single file fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OnError {
    /// Roll back the file and stop the run.
    #[default]
    Abort,
    /// Roll back the file, log it and move on to the next one.
    SkipFile,
}
