use super::BlobStore;
use crate::error::{Result, ShoeboxError};
use directories::ProjectDirs;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem blob store: one `<key>.json` file per collection under a root
/// directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform data directory for shoebox collections
    /// (e.g. `~/.local/share/shoebox` on Linux).
    pub fn default_root() -> Result<PathBuf> {
        ProjectDirs::from("", "", "shoebox")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ShoeboxError::Store("No home directory available".to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShoeboxError::Io)?;
        }
        Ok(())
    }
}

impl BlobStore for FileBackend {
    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_root()?;

        // Write to a temp file then rename, so a crash mid-write never
        // leaves a truncated collection behind.
        let path = self.blob_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, blob).map_err(ShoeboxError::Io)?;
        fs::rename(&tmp, &path).map_err(ShoeboxError::Io)?;
        debug!("wrote `{}` ({} bytes)", path.display(), blob.len());
        Ok(())
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShoeboxError::Io(e)),
        }
    }
}
