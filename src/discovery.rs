//! Recursive discovery of input files under a dataset root.

use crate::error::EtlError;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const JSON_EXTENSION: &str = "json";

/// Returns the absolute path of every `*.<extension>` file below `root`, at
/// any depth.
///
/// Entries are visited in file name order within each directory, so the
/// result is stable for a given filesystem state. Hidden files (leading `.`)
/// are skipped, hidden directories are still descended into. An empty tree
/// yields an empty list.
pub fn find_files<P: AsRef<Path>>(root: P, extension: &str) -> Result<Vec<PathBuf>, EtlError> {
    let root = root.as_ref();
    let root = root
        .canonicalize()
        .map_err(|e| EtlError::filesystem(root, e))?;
    if !root.is_dir() {
        return Err(EtlError::filesystem(
            &root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
            EtlError::filesystem(path, source)
        })?;

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && matches_extension(entry.file_name().to_string_lossy().as_ref(), extension) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn matches_extension(file_name: &str, extension: &str) -> bool {
    if file_name.starts_with('.') {
        return false;
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext == extension,
        None => false,
    }
}
