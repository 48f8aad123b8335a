use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::BlobStore;
use crate::Result;

/// Store keeping one file per blob under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BlobStore for FileStore {
    fn read(&self, name: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.blob_path(name), contents)?;
        Ok(())
    }
}
