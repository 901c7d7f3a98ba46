//! Error types shared by discovery, transformation and loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a [`crate::store::WarehouseStore`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Only produced by the in-memory store when a failure was scripted.
    #[error("Injected failure: {0}")]
    Injected(String),
}

/// Top level error of an ETL run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Malformed record in {}{}: {reason}", path.display(), line.map(|l| format!(" (line {})", l)).unwrap_or_default())]
    MalformedRecord {
        path: PathBuf,
        /// 1-based line number, only set for line-delimited files.
        line: Option<usize>,
        reason: String,
    },

    #[error("Filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl EtlError {
    pub fn malformed<P: AsRef<Path>, S: Into<String>>(path: P, line: Option<usize>, reason: S) -> Self {
        EtlError::MalformedRecord {
            path: path.as_ref().to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub fn filesystem<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        EtlError::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the skip-file policy may swallow this error.
    ///
    /// Store-level failures (broken connection, schema, transaction state)
    /// always abort. Discovery errors never reach this check.
    pub fn is_file_scoped(&self) -> bool {
        match self {
            EtlError::MalformedRecord { .. } => true,
            EtlError::Filesystem { .. } => true,
            EtlError::Persistence(PersistenceError::Sqlite(
                rusqlite::Error::SqliteFailure(err, _),
            )) => err.code == rusqlite::ErrorCode::ConstraintViolation,
            EtlError::Persistence(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_includes_line_when_known() {
        let err = EtlError::malformed("/data/log.json", Some(3), "missing field `page`");
        assert_eq!(
            err.to_string(),
            "Malformed record in /data/log.json (line 3): missing field `page`"
        );

        let err = EtlError::malformed("/data/song.json", None, "empty song_id");
        assert_eq!(
            err.to_string(),
            "Malformed record in /data/song.json: empty song_id"
        );
    }

    #[test]
    fn store_failures_are_not_file_scoped() {
        let err: EtlError = PersistenceError::Transaction("no active transaction".into()).into();
        assert!(!err.is_file_scoped());

        let err = EtlError::malformed("/x.json", None, "bad");
        assert!(err.is_file_scoped());
    }
}
