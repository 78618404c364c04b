use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ImporterError, Result};

/// Replace `path` with `contents` by writing a sibling temp file and renaming
/// it over the target. Readers see either the old file or the new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|source| ImporterError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Read a whole text file, tagging failures with the path
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ImporterError::Read {
        path: path.to_path_buf(),
        source,
    })
}
