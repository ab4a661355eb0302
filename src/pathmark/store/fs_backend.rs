use super::backend::DocumentBackend;
use crate::error::{PathmarkError, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Filesystem backend keeping the whole document in one JSON file.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    fn dir(&self) -> &Path {
        self.data_file.parent().unwrap_or_else(|| Path::new("."))
    }

    fn ensure_dir(&self) -> Result<()> {
        let dir = self.dir();
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(PathmarkError::Io)?;
        }
        Ok(())
    }

    fn file_name(&self) -> String {
        self.data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string())
    }
}

impl DocumentBackend for FsBackend {
    fn read_document(&self) -> Result<Option<Vec<u8>>> {
        if !self.data_file.exists() {
            debug!(path = %self.data_file.display(), "no document on disk");
            return Ok(None);
        }
        let bytes = fs::read(&self.data_file).map_err(PathmarkError::Io)?;
        debug!(path = %self.data_file.display(), bytes = bytes.len(), "read document");
        Ok(Some(bytes))
    }

    fn write_document(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write: a crash mid-write leaves the old document intact.
        let tmp_file = self
            .dir()
            .join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        fs::write(&tmp_file, bytes).map_err(PathmarkError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(PathmarkError::Io(e));
        }

        debug!(path = %self.data_file.display(), bytes = bytes.len(), "wrote document");
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let target = self
            .dir()
            .join(format!("{}.corrupt-{}", self.file_name(), stamp));
        fs::rename(&self.data_file, &target).map_err(PathmarkError::Io)?;
        warn!(
            from = %self.data_file.display(),
            to = %target.display(),
            "moved unreadable document aside"
        );
        Ok(Some(target))
    }

    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }
}
