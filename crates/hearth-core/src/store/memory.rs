use std::collections::HashMap;
use std::sync::Mutex;

use super::BlobStore;
use crate::Result;

/// In-memory store. The test double for [`super::FileStore`], also handy
/// for embedders that want nothing on disk.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        Ok(blobs.get(name).cloned())
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        blobs.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}
