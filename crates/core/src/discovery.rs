//! Report discovery via glob expansion
//!
//! Symbolic links are never followed: a link matching the pattern is skipped
//! rather than resolved. Paths are returned in the order the glob enumerator
//! yields them, which is the order reports are aggregated in.

use crate::error::AnnotateError;
use std::path::{Path, PathBuf};

/// A report document read from disk, not yet parsed
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Expand `pattern` into the regular files it matches.
pub fn discover_reports(pattern: &str) -> Result<Vec<PathBuf>, AnnotateError> {
    let entries = glob::glob(pattern).map_err(|source| AnnotateError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            AnnotateError::Read {
                path,
                source: e.into(),
            }
        })?;

        if is_regular_file(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Lazily read each path, one document at a time.
pub fn read_documents(
    paths: impl IntoIterator<Item = PathBuf>,
) -> impl Iterator<Item = Result<RawDocument, AnnotateError>> {
    paths.into_iter().map(|path| match std::fs::read(&path) {
        Ok(bytes) => Ok(RawDocument { path, bytes }),
        Err(source) => Err(AnnotateError::Read { path, source }),
    })
}

fn is_regular_file(path: &Path) -> bool {
    // symlink_metadata does not traverse the link itself
    std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_file())
        .unwrap_or(false)
}
