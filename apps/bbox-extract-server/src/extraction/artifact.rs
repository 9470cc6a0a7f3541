//! Temporary document artifacts
//!
//! Each request materializes its document into its own uniquely named file,
//! so concurrent requests never share a path.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;

/// On-disk copy of a downloaded document, owned by one processing call
#[derive(Debug)]
pub struct TempArtifact {
    path: TempPath,
}

impl TempArtifact {
    /// Write `bytes` to a fresh `bbox-*.pdf` file inside `dir`
    pub fn persist(bytes: &[u8], dir: &Path) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("bbox-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file. A file that is already gone counts as removed.
    pub fn remove(self) -> std::io::Result<()> {
        match self.path.close() {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
